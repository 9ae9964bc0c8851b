//! Scene files.
//!
//! A scene is a YAML document describing the system constants, an optional
//! background sphere, and the bodies in raw (unscaled) units:
//!
//! ```yaml
//! g: 6.67384e-20
//! scale: 1000.0
//! sim_seconds_per_real_second: 86400.0
//! background:
//!   radius: 1.0e9
//!   tilt: 60.0
//! bodies:
//!   - name: Sun
//!     mass: 1.989e30
//!     radius: 696000.0
//!     position: [0.0, 0.0, 0.0]
//!     velocity: [0.0, 0.0, 0.0]
//!     tilt: 7.25
//!     rotational_speed: 2.865e-6
//! ```

use crate::body::{Appearance, BodyDescriptor};
use crate::error::{Error, Result};
use crate::{OrbitalSystem, StepOrdering, SystemParams};
use cgmath::Vector3;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
  pub g: f64,
  pub scale: f64,
  #[serde(default = "default_time_scale")]
  pub sim_seconds_per_real_second: f64,
  #[serde(default)]
  pub softening: f64,
  #[serde(default)]
  pub ordering: StepOrdering,
  pub background: Option<BackgroundConfig>,
  #[serde(default)]
  pub bodies: Vec<BodyConfig>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BackgroundConfig {
  pub radius: f64,
  #[serde(default)]
  pub tilt: f64,
  pub mesh_file: Option<PathBuf>,
  pub texture_file: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
  pub name: String,
  pub mass: f64,
  pub radius: f64,
  pub position: [f64; 3],
  pub velocity: [f64; 3],
  /// Degrees.
  #[serde(default)]
  pub tilt: f64,
  /// Radians per simulation second.
  #[serde(default)]
  pub rotational_speed: f64,
  pub mesh_file: Option<PathBuf>,
  pub texture_file: Option<PathBuf>,
}

fn default_time_scale() -> f64 {
  1.0
}

impl SceneConfig {
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let scene = Self::from_yaml(&text)?;
    log::info!("loaded scene {} with {} bodies", path.display(), scene.bodies.len());
    Ok(scene)
  }

  pub fn from_yaml(text: &str) -> Result<Self> {
    let scene: Self = serde_yaml::from_str(text)?;
    scene.validate()?;
    Ok(scene)
  }

  pub fn params(&self) -> SystemParams {
    SystemParams {
      gravity: self.g,
      scale: self.scale,
      sim_seconds_per_real_second: self.sim_seconds_per_real_second,
      softening: self.softening,
      ordering: self.ordering,
    }
  }

  pub fn validate(&self) -> Result<()> {
    self.params().validate()?;

    if let Some(background) = &self.background {
      check_body("background", "radius", background.radius, |r| r > 0.0)?;
      check_body("background", "tilt", background.tilt, |_| true)?;
    }

    let mut names = HashSet::new();
    for body in &self.bodies {
      if !names.insert(body.name.as_str()) {
        return Err(Error::DuplicateBody(body.name.clone()));
      }
      check_body(&body.name, "mass", body.mass, |m| m >= 0.0)?;
      check_body(&body.name, "radius", body.radius, |r| r > 0.0)?;
      check_body(&body.name, "tilt", body.tilt, |_| true)?;
      check_body(&body.name, "rotational_speed", body.rotational_speed, |_| true)?;
      for value in body.position.iter().chain(&body.velocity) {
        check_body(&body.name, "position/velocity", *value, |_| true)?;
      }
    }

    for (i, first) in self.bodies.iter().enumerate() {
      if let Some(second) = self.bodies[i + 1..].iter().find(|b| b.position == first.position) {
        return Err(Error::CoincidentBodies {
          first: first.name.clone(),
          second: second.name.clone(),
        });
      }
    }
    Ok(())
  }

  /// Builds the system this scene describes.
  #[must_use]
  pub fn build(&self) -> OrbitalSystem {
    let mut system = OrbitalSystem::new(self.params());
    if let Some(background) = &self.background {
      system.set_background(background.descriptor());
    }
    for body in &self.bodies {
      system.add_body(body.descriptor());
    }
    system
  }
}

impl BackgroundConfig {
  pub fn descriptor(&self) -> BodyDescriptor {
    BodyDescriptor {
      name: "Celestial Sphere".to_string(),
      radius: self.radius,
      tilt: self.tilt,
      appearance: Appearance {
        mesh_file: self.mesh_file.clone(),
        texture_file: self.texture_file.clone(),
      },
      ..Default::default()
    }
  }
}

impl BodyConfig {
  pub fn descriptor(&self) -> BodyDescriptor {
    BodyDescriptor {
      name: self.name.clone(),
      mass: self.mass,
      radius: self.radius,
      position: Vector3::from(self.position),
      velocity: Vector3::from(self.velocity),
      tilt: self.tilt,
      angular_velocity: self.rotational_speed,
      appearance: Appearance {
        mesh_file: self.mesh_file.clone(),
        texture_file: self.texture_file.clone(),
      },
    }
  }
}

fn check_body(body: &str, field: &str, value: f64, ok: impl Fn(f64) -> bool) -> Result<()> {
  if value.is_finite() && ok(value) {
    Ok(())
  } else {
    Err(Error::InvalidBody {
      body: body.to_string(),
      reason: format!("{field} has invalid value {value}"),
    })
  }
}
