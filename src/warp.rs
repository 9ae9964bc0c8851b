pub const WARP_SCALE: f64 = 1.25;
pub const MIN_WARP: f64 = 0.25;
pub const MAX_WARP: f64 = 4.0;

/// Multiplier on real elapsed time, adjusted interactively in steps of
/// [`WARP_SCALE`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeWarp {
  factor: f64,
}

impl Default for TimeWarp {
  fn default() -> Self {
    Self { factor: 1.0 }
  }
}

impl TimeWarp {
  /// Starts at `factor`, clamped to the allowed range.
  pub fn new(factor: f64) -> Self {
    let clamped = if factor.is_nan() {
      1.0
    } else {
      factor.clamp(MIN_WARP, MAX_WARP)
    };
    if clamped != factor {
      log::warn!("warp factor {factor} out of range, using {clamped}");
    }
    Self { factor: clamped }
  }

  pub fn factor(&self) -> f64 {
    self.factor
  }

  pub fn faster(&mut self) {
    if self.factor < MAX_WARP {
      self.factor = (self.factor * WARP_SCALE).min(MAX_WARP);
    } else {
      log::warn!("max warp achieved: {MAX_WARP}x");
    }
  }

  pub fn slower(&mut self) {
    if self.factor > MIN_WARP {
      self.factor = (self.factor / WARP_SCALE).max(MIN_WARP);
    } else {
      log::warn!("min warp achieved: {MIN_WARP}x");
    }
  }

  pub fn apply(&self, real_seconds: f64) -> f64 {
    real_seconds * self.factor
  }
}
