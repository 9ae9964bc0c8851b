use cgmath::{Matrix3, Matrix4, Rad, Vector3, Zero};
use std::f64::consts::TAU;
use std::path::PathBuf;

/// Axis every body spins about before its tilt is applied.
pub fn default_rotation_axis() -> Vector3<f64> {
  Vector3::unit_y()
}

/// Mesh and texture references handed through to a renderer untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Appearance {
  pub mesh_file: Option<PathBuf>,
  pub texture_file: Option<PathBuf>,
}

/// Initial state of a body, in the raw units of the scene it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDescriptor {
  pub name: String,
  pub mass: f64,
  pub radius: f64,
  pub position: Vector3<f64>,
  pub velocity: Vector3<f64>,
  /// Degrees.
  pub tilt: f64,
  /// Radians per simulation second.
  pub angular_velocity: f64,
  pub appearance: Appearance,
}

impl Default for BodyDescriptor {
  fn default() -> Self {
    Self {
      name: String::new(),
      mass: 0.0,
      radius: 1.0,
      position: Vector3::zero(),
      velocity: Vector3::zero(),
      tilt: 0.0,
      angular_velocity: 0.0,
      appearance: Appearance::default(),
    }
  }
}

/// A point mass with a visual radius.
///
/// Linear and rotational state is only written by the owning
/// [`OrbitalSystem`](crate::OrbitalSystem); everything a renderer needs is
/// available through the read accessors once a step has completed.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
  name: String,
  mass: f64,
  radius: f64,
  appearance: Appearance,

  position: Vector3<f64>,
  velocity: Vector3<f64>,
  acceleration: Vector3<f64>,
  linear_thrust: Vector3<f64>,
  gravity: Vector3<f64>,

  tilt: f64,
  rotation_axis: Vector3<f64>,
  angular_position: f64,
  angular_velocity: f64,
  angular_acceleration: f64,
  angular_thrust: f64,
}

impl Body {
  /// Builds a body from a descriptor that is already in system units.
  #[must_use]
  pub fn new(descriptor: BodyDescriptor) -> Self {
    let tilt = descriptor.tilt.to_radians();
    Self {
      name: descriptor.name,
      mass: descriptor.mass,
      radius: descriptor.radius,
      appearance: descriptor.appearance,
      position: descriptor.position,
      velocity: descriptor.velocity,
      acceleration: Vector3::zero(),
      linear_thrust: Vector3::zero(),
      gravity: Vector3::zero(),
      tilt,
      rotation_axis: tilted_axis(tilt),
      angular_position: 0.0,
      angular_velocity: descriptor.angular_velocity,
      angular_acceleration: 0.0,
      angular_thrust: 0.0,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn mass(&self) -> f64 {
    self.mass
  }

  /// Immovable bodies are never advanced by the integrator.
  pub fn is_immovable(&self) -> bool {
    self.mass == 0.0
  }

  pub fn radius(&self) -> f64 {
    self.radius
  }

  pub fn appearance(&self) -> &Appearance {
    &self.appearance
  }

  pub fn position(&self) -> Vector3<f64> {
    self.position
  }

  pub fn velocity(&self) -> Vector3<f64> {
    self.velocity
  }

  pub fn acceleration(&self) -> Vector3<f64> {
    self.acceleration
  }

  pub fn linear_thrust(&self) -> Vector3<f64> {
    self.linear_thrust
  }

  /// Net gravitational acceleration computed at the end of the last step.
  pub fn gravity(&self) -> Vector3<f64> {
    self.gravity
  }

  /// Tilt of the rotation axis away from +Y, in radians.
  pub fn tilt(&self) -> f64 {
    self.tilt
  }

  pub fn rotation_axis(&self) -> Vector3<f64> {
    self.rotation_axis
  }

  pub fn angular_position(&self) -> f64 {
    self.angular_position
  }

  pub fn angular_velocity(&self) -> f64 {
    self.angular_velocity
  }

  pub fn angular_acceleration(&self) -> f64 {
    self.angular_acceleration
  }

  pub fn angular_thrust(&self) -> f64 {
    self.angular_thrust
  }

  pub fn momentum(&self) -> Vector3<f64> {
    self.velocity * self.mass
  }

  pub fn set_linear_thrust(&mut self, thrust: Vector3<f64>) {
    self.linear_thrust = thrust;
  }

  pub fn set_angular_thrust(&mut self, thrust: f64) {
    self.angular_thrust = thrust;
  }

  /// Acceleration produced by the applied linear thrust.
  pub fn thrust_acceleration(&self) -> Vector3<f64> {
    if self.is_immovable() {
      Vector3::zero()
    } else {
      self.linear_thrust / self.mass
    }
  }

  pub(crate) fn set_angular_position(&mut self, angle: f64) {
    self.angular_position = wrap_angle(angle);
  }

  pub(crate) fn apply(&mut self, update: BodyUpdate) {
    self.position = update.position;
    self.velocity = update.velocity;
    self.acceleration = update.acceleration;
    self.gravity = update.gravity;
    self.angular_acceleration = update.angular_acceleration;
    self.angular_velocity = update.angular_velocity;
    self.set_angular_position(update.angular_position);
  }

  /// Scale, then spin about +Y, then tilt, then translate.
  pub fn model_to_world(&self) -> Matrix4<f64> {
    let translation = Matrix4::from_translation(self.position);
    let rotation = Matrix4::from_angle_x(Rad(self.tilt)) * Matrix4::from_angle_y(Rad(self.angular_position));
    let scale = Matrix4::from_scale(self.radius);
    translation * rotation * scale
  }

  #[must_use]
  pub fn instance(&self) -> BodyInstance {
    let model: [[f64; 4]; 4] = self.model_to_world().into();
    BodyInstance {
      model: model.map(|column| column.map(|x| x as f32)),
    }
  }
}

/// New state produced by one integration step, committed with [`Body::apply`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BodyUpdate {
  pub position: Vector3<f64>,
  pub velocity: Vector3<f64>,
  pub acceleration: Vector3<f64>,
  pub gravity: Vector3<f64>,
  pub angular_position: f64,
  pub angular_velocity: f64,
  pub angular_acceleration: f64,
}

/// Per-body data laid out for upload to a GPU instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
  pub model: [[f32; 4]; 4],
}

fn tilted_axis(tilt: f64) -> Vector3<f64> {
  Matrix3::from_angle_x(Rad(tilt)) * default_rotation_axis()
}

/// Wraps an angle into `[0, 2π)`.
pub fn wrap_angle(angle: f64) -> f64 {
  let wrapped = angle.rem_euclid(TAU);
  // rem_euclid can round up to exactly TAU for tiny negative inputs
  if wrapped >= TAU {
    0.0
  } else {
    wrapped
  }
}
