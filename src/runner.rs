//! Headless driver loop: feeds elapsed time into a system once per tick.

use crate::error::{Error, Result};
use crate::warp::TimeWarp;
use crate::OrbitalSystem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[derive(Clone, Debug, PartialEq)]
pub struct RunOptions {
  /// Stop after this many ticks; `None` runs until `stop` is raised.
  pub ticks: Option<u64>,
  /// Real seconds per tick. In realtime mode this is the target tick length.
  pub tick_seconds: f64,
  pub warp: TimeWarp,
  /// Log a state report every this many ticks; zero disables reports.
  pub report_every: u64,
  /// Sleep between ticks and feed measured wall-clock time to the system.
  pub realtime: bool,
}

impl Default for RunOptions {
  fn default() -> Self {
    Self {
      ticks: Some(600),
      tick_seconds: 1.0 / 60.0,
      warp: TimeWarp::default(),
      report_every: 60,
      realtime: false,
    }
  }
}

impl RunOptions {
  /// Target length of one tick, if `tick_seconds` is usable.
  pub fn tick(&self) -> Result<Duration> {
    if !self.tick_seconds.is_finite() || self.tick_seconds <= 0.0 {
      return Err(Error::InvalidParameter {
        name: "tick_seconds".to_string(),
        reason: format!("must be finite and positive, got {}", self.tick_seconds),
      });
    }
    Duration::try_from_secs_f64(self.tick_seconds).map_err(|e| Error::InvalidParameter {
      name: "tick_seconds".to_string(),
      reason: e.to_string(),
    })
  }
}

/// Runs ticks until the tick budget is spent or `stop` is raised. Returns the
/// number of ticks taken.
pub fn run(system: &mut OrbitalSystem, options: &RunOptions, stop: &AtomicBool) -> Result<u64> {
  let tick = options.tick()?;
  let mut last = Instant::now();
  let mut ticks = 0;

  while options.ticks.map_or(true, |limit| ticks < limit) {
    if stop.load(Ordering::SeqCst) {
      log::info!("stopping after {ticks} ticks");
      break;
    }

    let real_seconds = if options.realtime {
      std::thread::sleep(tick.saturating_sub(last.elapsed()));
      let now = Instant::now();
      let elapsed = now.duration_since(last).as_secs_f64();
      last = now;
      elapsed
    } else {
      options.tick_seconds
    };

    system.advance(options.warp.apply(real_seconds));
    ticks += 1;

    if options.report_every > 0 && ticks % options.report_every == 0 {
      log::info!("tick {ticks}\n{}", report(system));
    }
  }
  Ok(ticks)
}

/// One line per body with its current kinematic state.
pub fn report(system: &OrbitalSystem) -> String {
  let mut out = format!("t = {:.6}", system.clock());
  for body in system.bodies() {
    let p = body.position();
    let v = body.velocity();
    let g = body.gravity();
    out.push_str(&format!(
      "\n  {:<16} p = ({:.6e}, {:.6e}, {:.6e})  v = ({:.6e}, {:.6e}, {:.6e})  g = ({:.3e}, {:.3e}, {:.3e})  theta = {:.4}",
      body.name(),
      p.x,
      p.y,
      p.z,
      v.x,
      v.y,
      v.z,
      g.x,
      g.y,
      g.z,
      body.angular_position(),
    ));
  }
  out
}
