pub mod body;
pub mod error;
pub mod gravity;
pub mod initialize;
pub mod integrator;
pub mod runner;
pub mod scene;
pub mod system;
pub mod warp;

pub use body::{Body, BodyDescriptor, BodyInstance};
pub use error::{Error, Result};
pub use system::OrbitalSystem;

/// Gravitational constant in km^3 kg^-1 s^-2.
pub const DEFAULT_G: f64 = 6.67384e-20;

/// How bodies sharing one step see each other's motion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepOrdering {
  /// Each body is integrated to completion before the next one, so later
  /// bodies see the already-updated positions of earlier ones.
  #[default]
  Sequential,
  /// Every body is integrated against the pre-step snapshot, then all
  /// updates are committed together.
  Synchronized,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SystemParams {
  /// Raw gravitational constant, divided by `scale` when the system is built.
  pub gravity: f64,
  /// Length-scale divisor applied to incoming body descriptors.
  pub scale: f64,
  pub sim_seconds_per_real_second: f64,
  /// Plummer softening length; zero keeps the exact inverse-square law.
  pub softening: f64,
  pub ordering: StepOrdering,
}

impl Default for SystemParams {
  fn default() -> Self {
    Self {
      gravity: DEFAULT_G,
      scale: 1.0,
      sim_seconds_per_real_second: 1.0,
      softening: 0.0,
      ordering: StepOrdering::Sequential,
    }
  }
}

impl SystemParams {
  pub fn validate(&self) -> Result<()> {
    let positive = [
      ("g", self.gravity),
      ("scale", self.scale),
      ("sim_seconds_per_real_second", self.sim_seconds_per_real_second),
    ];
    for (name, value) in positive {
      if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidParameter {
          name: name.to_string(),
          reason: format!("must be finite and positive, got {value}"),
        });
      }
    }
    if !self.softening.is_finite() || self.softening < 0.0 {
      return Err(Error::InvalidParameter {
        name: "softening".to_string(),
        reason: format!("must be finite and non-negative, got {}", self.softening),
      });
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_params_are_valid() {
    assert!(SystemParams::default().validate().is_ok());
  }

  #[test]
  fn rejects_non_positive_scale() {
    let params = SystemParams {
      scale: 0.0,
      ..Default::default()
    };
    match params.validate() {
      Err(Error::InvalidParameter { name, .. }) => assert_eq!(name, "scale"),
      other => panic!("unexpected result: {other:?}"),
    }
  }

  #[test]
  fn rejects_negative_softening() {
    let params = SystemParams {
      softening: -1.0,
      ..Default::default()
    };
    assert!(params.validate().is_err());
  }
}
