//! Fixed-step integration of a single body.
//!
//! Linear motion uses classical fourth-order Runge-Kutta on the coupled
//! system `r' = v`, `v' = a(r)`. Rotation is not coupled to gravity and is
//! advanced with explicit Euler.

use crate::body::{wrap_angle, Body, BodyUpdate};
use crate::gravity::Gravity;
use cgmath::Vector3;

/// Computes the state `bodies[subject]` reaches after `dt` simulation
/// seconds, holding every other body at its current position.
///
/// Immovable bodies keep their position and velocity; their spin and gravity
/// vector are still refreshed.
#[must_use]
pub fn step(bodies: &[Body], subject: usize, dt: f64, gravity: &Gravity) -> BodyUpdate {
  let body = &bodies[subject];

  let (position, velocity) = if body.is_immovable() {
    (body.position(), body.velocity())
  } else {
    rk4(body.position(), body.velocity(), dt, |r| gravity.acceleration(bodies, subject, r))
  };

  // Reported at the new position, not taken from a stage.
  let field = gravity.vector(bodies, subject, position);

  let angular_acceleration = if body.is_immovable() {
    0.0
  } else {
    body.angular_thrust() / body.mass()
  };
  let angular_position = wrap_angle(body.angular_position() + body.angular_velocity() * dt);
  let angular_velocity = body.angular_velocity() + angular_acceleration * dt;

  BodyUpdate {
    position,
    velocity,
    acceleration: field + body.thrust_acceleration(),
    gravity: field,
    angular_position,
    angular_velocity,
    angular_acceleration,
  }
}

/// One classical RK4 step; `k` are position increments, `l` velocity
/// increments.
pub fn rk4<F>(r: Vector3<f64>, v: Vector3<f64>, dt: f64, accel: F) -> (Vector3<f64>, Vector3<f64>)
where
  F: Fn(Vector3<f64>) -> Vector3<f64>,
{
  let k0 = v * dt;
  let l0 = accel(r) * dt;
  let k1 = (v + l0 * 0.5) * dt;
  let l1 = accel(r + k0 * 0.5) * dt;
  let k2 = (v + l1 * 0.5) * dt;
  let l2 = accel(r + k1 * 0.5) * dt;
  let k3 = (v + l2) * dt;
  let l3 = accel(r + k2) * dt;

  let r = r + (k0 + k1 * 2.0 + k2 * 2.0 + k3) / 6.0;
  let v = v + (l0 + l1 * 2.0 + l2 * 2.0 + l3) / 6.0;
  (r, v)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::body::BodyDescriptor;
  use cgmath::{InnerSpace, Zero};
  use std::f64::consts::TAU;

  #[test]
  fn constant_acceleration_is_integrated_exactly() {
    let a = Vector3::new(0.0, -9.81, 0.0);
    let v0 = Vector3::new(3.0, 4.0, 0.0);
    let (r, v) = rk4(Vector3::zero(), v0, 2.0, |_| a);
    let expected_r = v0 * 2.0 + a * 2.0;
    assert!((r - expected_r).magnitude() < 1e-12);
    assert!((v - (v0 + a * 2.0)).magnitude() < 1e-12);
  }

  #[test]
  fn harmonic_oscillator_error_is_fourth_order() {
    let spring = |r: Vector3<f64>| -r;
    let run = |steps: usize| {
      let dt = 1.0 / steps as f64;
      let mut state = (Vector3::new(1.0, 0.0, 0.0), Vector3::zero());
      for _ in 0..steps {
        state = rk4(state.0, state.1, dt, spring);
      }
      (state.0.x - 1.0_f64.cos()).abs()
    };
    let coarse = run(10);
    let fine = run(20);
    // halving dt should cut the error by about 2^4
    assert!(coarse / fine > 12.0);
  }

  #[test]
  fn immovable_body_keeps_linear_state_but_spins() {
    let bodies = vec![
      Body::new(BodyDescriptor {
        mass: 0.0,
        velocity: Vector3::new(1.0, 0.0, 0.0),
        angular_velocity: 1.0,
        ..Default::default()
      }),
      Body::new(BodyDescriptor {
        mass: 50.0,
        position: Vector3::new(5.0, 0.0, 0.0),
        ..Default::default()
      }),
    ];
    let gravity = Gravity::new(1.0, 0.0);
    let update = step(&bodies, 0, 0.5, &gravity);
    assert_eq!(update.position, bodies[0].position());
    assert_eq!(update.velocity, bodies[0].velocity());
    assert!((update.angular_position - 0.5).abs() < 1e-15);
    assert!((update.gravity.x - 2.0).abs() < 1e-12);
  }

  #[test]
  fn angular_position_wraps_past_a_full_turn() {
    let bodies = vec![Body::new(BodyDescriptor {
      mass: 1.0,
      angular_velocity: 2.0,
      ..Default::default()
    })];
    let update = step(&bodies, 0, 4.0, &Gravity::new(1.0, 0.0));
    assert!((update.angular_position - (8.0 - TAU)).abs() < 1e-12);
  }

  #[test]
  fn angular_thrust_spins_up_after_the_angle_update() {
    let mut bodies = vec![Body::new(BodyDescriptor {
      mass: 2.0,
      ..Default::default()
    })];
    bodies[0].set_angular_thrust(4.0);
    let update = step(&bodies, 0, 1.0, &Gravity::new(1.0, 0.0));
    assert_eq!(update.angular_position, 0.0);
    assert_eq!(update.angular_velocity, 2.0);
    assert_eq!(update.angular_acceleration, 2.0);
  }

  #[test]
  fn angular_thrust_does_nothing_to_an_immovable_body() {
    let mut bodies = vec![Body::new(BodyDescriptor {
      mass: 0.0,
      angular_velocity: 0.5,
      ..Default::default()
    })];
    bodies[0].set_angular_thrust(4.0);
    let update = step(&bodies, 0, 1.0, &Gravity::new(1.0, 0.0));
    assert_eq!(update.angular_acceleration, 0.0);
    assert_eq!(update.angular_velocity, 0.5);
    assert_eq!(update.angular_position, 0.5);
  }

  #[test]
  fn gravity_is_refreshed_at_the_new_position() {
    let bodies = vec![
      Body::new(BodyDescriptor {
        mass: 1.0,
        velocity: Vector3::new(0.0, 0.0, 1.0),
        ..Default::default()
      }),
      Body::new(BodyDescriptor {
        mass: 0.0,
        position: Vector3::new(10.0, 0.0, 0.0),
        ..Default::default()
      }),
      Body::new(BodyDescriptor {
        mass: 1000.0,
        position: Vector3::new(0.0, 0.0, 1000.0),
        ..Default::default()
      }),
    ];
    let gravity = Gravity::new(1.0, 0.0);
    let update = step(&bodies, 0, 0.1, &gravity);
    let expected = gravity.vector(&bodies, 0, update.position);
    assert_eq!(update.gravity, expected);
    assert_eq!(update.acceleration, expected);
  }
}
