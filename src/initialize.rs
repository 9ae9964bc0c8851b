use crate::body::BodyDescriptor;
use crate::error::Result;
use crate::{OrbitalSystem, SystemParams};
use cgmath::{Matrix3, Rad, Vector3};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

/// Parameters of the procedurally generated demo system.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DemoParams {
  pub seed: u64,
  pub central_mass: f64,
  pub central_radius: f64,
  pub satellites: u32,
  pub satellite_mass: f64,
  pub inner_orbit: f64,
  pub orbit_spacing: f64,
  /// Standard deviation of orbital inclination, in radians.
  pub inclination_std: f64,
  pub max_spin: f64,
  pub background_radius: f64,
}

impl Default for DemoParams {
  fn default() -> Self {
    Self {
      seed: 42,
      central_mass: 1000.0,
      central_radius: 2.0,
      satellites: 6,
      satellite_mass: 1e-3,
      inner_orbit: 10.0,
      orbit_spacing: 6.0,
      inclination_std: 0.05,
      max_spin: 2.0,
      background_radius: 500.0,
    }
  }
}

/// A heavy star orbited by light satellites on circular orbits in the XZ
/// plane, each slightly inclined. Uses unit gravity and unit scale.
pub fn create_demo_system(demo: &DemoParams) -> Result<OrbitalSystem> {
  let mut rng = SmallRng::seed_from_u64(demo.seed);
  let inclination = Normal::new(0.0, demo.inclination_std)?;
  let params = SystemParams {
    gravity: 1.0,
    ..Default::default()
  };
  let g = params.gravity;
  let mut system = OrbitalSystem::new(params);

  system.set_background(BodyDescriptor {
    name: "Celestial Sphere".to_string(),
    radius: demo.background_radius,
    tilt: 60.0,
    ..Default::default()
  });

  system.add_body(BodyDescriptor {
    name: "Star".to_string(),
    mass: demo.central_mass,
    radius: demo.central_radius,
    angular_velocity: 0.1,
    ..Default::default()
  });

  for i in 0..demo.satellites {
    let r = demo.inner_orbit + demo.orbit_spacing * i as f64;
    let phase = rng.gen::<f64>() * 2.0 * PI;
    let tilt_orbit = Matrix3::from_angle_x(Rad(inclination.sample(&mut rng)));

    let position = tilt_orbit * Vector3::new(r * phase.cos(), 0.0, r * phase.sin());
    let speed = (g * demo.central_mass / r).sqrt();
    let velocity = tilt_orbit * Vector3::new(-speed * phase.sin(), 0.0, speed * phase.cos());

    system.add_body(BodyDescriptor {
      name: format!("Satellite {}", i + 1),
      mass: demo.satellite_mass,
      radius: 0.2 + rng.gen::<f64>() * 0.6,
      position,
      velocity,
      tilt: rng.gen_range(-30.0..30.0),
      angular_velocity: rng.gen::<f64>() * demo.max_spin,
      ..Default::default()
    });
  }

  log::info!("generated demo system with {} bodies", system.bodies().len());
  Ok(system)
}
