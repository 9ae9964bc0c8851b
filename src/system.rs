use crate::body::{Body, BodyDescriptor, BodyInstance};
use crate::gravity::Gravity;
use crate::integrator;
use crate::{StepOrdering, SystemParams};
use cgmath::{Vector3, Zero};

/// A collection of bodies interacting through gravity.
///
/// The system exclusively owns its bodies. Mutation happens through
/// [`advance`](Self::advance) and the explicit add/remove operations; readers
/// borrow bodies immutably between steps.
#[derive(Clone, Debug)]
pub struct OrbitalSystem {
  gravity: Gravity,
  scale: f64,
  sim_seconds_per_real_second: f64,
  ordering: StepOrdering,
  clock: f64,
  bodies: Vec<Body>,
  /// Massless backdrop drawn with the bodies but never simulated.
  background: Option<Body>,
}

impl OrbitalSystem {
  #[must_use]
  pub fn new(params: SystemParams) -> Self {
    Self {
      gravity: Gravity::new(params.gravity / params.scale, params.softening),
      scale: params.scale,
      sim_seconds_per_real_second: params.sim_seconds_per_real_second,
      ordering: params.ordering,
      clock: 0.0,
      bodies: Vec::new(),
      background: None,
    }
  }

  /// Gravitational constant in system units.
  pub fn g(&self) -> f64 {
    self.gravity.g
  }

  pub fn scale(&self) -> f64 {
    self.scale
  }

  pub fn softening(&self) -> f64 {
    self.gravity.softening
  }

  pub fn ordering(&self) -> StepOrdering {
    self.ordering
  }

  pub fn sim_seconds_per_real_second(&self) -> f64 {
    self.sim_seconds_per_real_second
  }

  /// Simulation time elapsed since the system was built.
  pub fn clock(&self) -> f64 {
    self.clock
  }

  pub fn bodies(&self) -> &[Body] {
    &self.bodies
  }

  pub fn body(&self, index: usize) -> Option<&Body> {
    self.bodies.get(index)
  }

  pub fn body_mut(&mut self, index: usize) -> Option<&mut Body> {
    self.bodies.get_mut(index)
  }

  pub fn body_by_name(&self, name: &str) -> Option<&Body> {
    self.bodies.iter().find(|b| b.name() == name)
  }

  pub fn background(&self) -> Option<&Body> {
    self.background.as_ref()
  }

  /// Converts `descriptor` from scene units and appends it. Returns the new
  /// body's index.
  pub fn add_body(&mut self, descriptor: BodyDescriptor) -> usize {
    let body = Body::new(self.to_system_units(descriptor));
    log::debug!("adding body `{}` (mass {})", body.name(), body.mass());
    self.bodies.push(body);
    self.bodies.len() - 1
  }

  pub fn remove_body(&mut self, index: usize) -> Option<Body> {
    if index >= self.bodies.len() {
      return None;
    }
    let body = self.bodies.remove(index);
    log::debug!("removed body `{}`", body.name());
    Some(body)
  }

  /// Installs the backdrop sphere. Its radius is taken as-is and its mass is
  /// forced to zero.
  pub fn set_background(&mut self, descriptor: BodyDescriptor) {
    self.background = Some(Body::new(BodyDescriptor {
      mass: 0.0,
      position: Vector3::zero(),
      velocity: Vector3::zero(),
      ..descriptor
    }));
  }

  /// Net gravitational acceleration `bodies[subject]` would feel at
  /// `position`.
  pub fn gravity_vector(&self, subject: usize, position: Vector3<f64>) -> Vector3<f64> {
    self.gravity.vector(&self.bodies, subject, position)
  }

  /// Advances the simulation by `real_seconds` of wall-clock time.
  pub fn advance(&mut self, real_seconds: f64) {
    if !real_seconds.is_finite() || real_seconds < 0.0 {
      log::warn!("ignoring tick of {real_seconds} real seconds");
      return;
    }
    let dt = real_seconds * self.sim_seconds_per_real_second;
    self.clock += dt;
    log::debug!("advancing {} bodies by {dt} (t = {})", self.bodies.len(), self.clock);

    match self.ordering {
      StepOrdering::Sequential => {
        for i in 0..self.bodies.len() {
          let update = integrator::step(&self.bodies, i, dt, &self.gravity);
          self.bodies[i].apply(update);
        }
      }
      StepOrdering::Synchronized => {
        let updates: Vec<_> = (0..self.bodies.len())
          .map(|i| integrator::step(&self.bodies, i, dt, &self.gravity))
          .collect();
        for (body, update) in self.bodies.iter_mut().zip(updates) {
          body.apply(update);
        }
      }
    }

    for body in &self.bodies {
      log::trace!("{}: p = {:?}, v = {:?}", body.name(), body.position(), body.velocity());
    }
  }

  pub fn total_momentum(&self) -> Vector3<f64> {
    self.bodies.iter().map(Body::momentum).fold(Vector3::zero(), |acc, p| acc + p)
  }

  /// Everything a renderer draws: the background first, then every body.
  pub fn drawables(&self) -> impl Iterator<Item = &Body> {
    self.background.iter().chain(self.bodies.iter())
  }

  #[must_use]
  pub fn instances(&self) -> Vec<BodyInstance> {
    self.drawables().map(Body::instance).collect()
  }

  fn to_system_units(&self, descriptor: BodyDescriptor) -> BodyDescriptor {
    let scale = self.scale;
    BodyDescriptor {
      mass: descriptor.mass / scale,
      radius: descriptor.radius / scale,
      position: descriptor.position / scale,
      velocity: descriptor.velocity / scale.sqrt(),
      ..descriptor
    }
  }
}

impl Default for OrbitalSystem {
  fn default() -> Self {
    Self::new(SystemParams::default())
  }
}
