//! Pairwise Newtonian gravity.
//!
//! The field is evaluated at an arbitrary query position rather than at the
//! subject's stored position, since the integrator samples it at
//! intermediate stage points.

use crate::body::Body;
use cgmath::{InnerSpace, Vector3, Zero};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Gravity {
  /// Gravitational constant in system units.
  pub g: f64,
  /// Plummer softening length. With zero, coincident bodies produce NaN.
  pub softening: f64,
}

impl Gravity {
  pub fn new(g: f64, softening: f64) -> Self {
    Self { g, softening }
  }

  /// Net acceleration felt by `bodies[subject]` if it were at `position`.
  ///
  /// Every other body contributes `G m d / (|d|^2 + eps^2)^(3/2)` where `d`
  /// points from `position` to that body. The subject never attracts itself.
  pub fn vector(&self, bodies: &[Body], subject: usize, position: Vector3<f64>) -> Vector3<f64> {
    let eps2 = self.softening * self.softening;
    let mut net = Vector3::zero();
    for (i, body) in bodies.iter().enumerate() {
      if i == subject {
        continue;
      }
      let displacement = body.position() - position;
      let r2 = displacement.magnitude2() + eps2;
      let r = r2.sqrt();
      net += displacement * (self.g * body.mass() / (r2 * r));
    }
    net
  }

  /// Total acceleration at `position`: gravity plus the subject's thrust.
  pub fn acceleration(&self, bodies: &[Body], subject: usize, position: Vector3<f64>) -> Vector3<f64> {
    self.vector(bodies, subject, position) + bodies[subject].thrust_acceleration()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::body::BodyDescriptor;

  fn body(mass: f64, x: f64) -> Body {
    Body::new(BodyDescriptor {
      mass,
      position: Vector3::new(x, 0.0, 0.0),
      ..Default::default()
    })
  }

  #[test]
  fn points_toward_the_other_body() {
    let bodies = vec![body(1.0, 0.0), body(5.0, 2.0)];
    let gravity = Gravity::new(1.0, 0.0);
    let a = gravity.vector(&bodies, 0, bodies[0].position());
    assert!(a.x > 0.0);
    assert_eq!(a.y, 0.0);
    assert_eq!(a.z, 0.0);
    assert!((a.x - 5.0 / 4.0).abs() < 1e-12);
  }

  #[test]
  fn follows_the_inverse_square_law() {
    let near = vec![body(1.0, 0.0), body(1.0, 1.0)];
    let far = vec![body(1.0, 0.0), body(1.0, 2.0)];
    let gravity = Gravity::new(0.1, 0.0);
    let ratio = gravity.vector(&near, 0, Vector3::zero()).magnitude() / gravity.vector(&far, 0, Vector3::zero()).magnitude();
    assert!((ratio - 4.0).abs() < 1e-12);
  }

  #[test]
  fn ignores_self_and_massless_sources() {
    let bodies = vec![body(100.0, 0.0), body(0.0, 3.0)];
    let gravity = Gravity::new(1.0, 0.0);
    assert_eq!(gravity.vector(&bodies, 0, Vector3::zero()), Vector3::zero());
  }

  #[test]
  fn evaluates_at_the_query_position() {
    let bodies = vec![body(1.0, 0.0), body(1.0, 10.0)];
    let gravity = Gravity::new(1.0, 0.0);
    let a = gravity.vector(&bodies, 0, Vector3::new(8.0, 0.0, 0.0));
    assert!((a.x - 0.25).abs() < 1e-12);
  }

  #[test]
  fn coincident_bodies_are_singular_without_softening() {
    let bodies = vec![body(1.0, 0.0), body(1.0, 0.0)];
    let a = Gravity::new(1.0, 0.0).vector(&bodies, 0, Vector3::zero());
    assert!(a.x.is_nan());
  }

  #[test]
  fn softening_keeps_close_encounters_finite() {
    let bodies = vec![body(1.0, 0.0), body(1.0, 1e-9)];
    let a = Gravity::new(1.0, 0.1).vector(&bodies, 0, Vector3::zero());
    assert!(a.magnitude() < 1e-5);
    let coincident = vec![body(1.0, 0.0), body(1.0, 0.0)];
    let a = Gravity::new(1.0, 0.1).vector(&coincident, 0, Vector3::zero());
    assert_eq!(a, Vector3::zero());
  }

  #[test]
  fn acceleration_adds_thrust_over_mass() {
    let mut bodies = vec![body(2.0, 0.0)];
    bodies[0].set_linear_thrust(Vector3::new(0.0, 4.0, 0.0));
    let a = Gravity::new(1.0, 0.0).acceleration(&bodies, 0, Vector3::zero());
    assert_eq!(a, Vector3::new(0.0, 2.0, 0.0));
  }
}
