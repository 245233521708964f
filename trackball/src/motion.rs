//! Acceleration and inertia of the pointer motion
//!
//! Motion reported by the sensor is not emitted right away. It is first scaled
//! by an acceleration curve that depends on the motion still carried from the
//! previous cycles, then added to the carried motion, and finally only a part
//! of the carried motion is emitted. The rest decays over the next cycles.
//!
//! All the arithmetic is integer-only and truncates toward zero.

use crate::config::{Norm, TrackballConfig};

/// Accelerated motion which hasn't been emitted yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionState {
    pub stored_dx: i32,
    pub stored_dy: i32,
}

impl MotionState {
    pub fn is_zero(&self) -> bool {
        self.stored_dx == 0 && self.stored_dy == 0
    }

    /// Add accelerated deltas to the carried motion
    pub fn accumulate(&mut self, add_dx: i32, add_dy: i32) {
        self.stored_dx = self.stored_dx.saturating_add(add_dx);
        self.stored_dy = self.stored_dy.saturating_add(add_dy);
    }
}

/// Acceleration curve.
#[derive(Debug, Clone, Copy)]
pub struct MotionTransformer {
    norm: Norm,
    exactness: i64,
    max_accel: i64,
}

impl MotionTransformer {
    pub fn new(norm: Norm, exactness: i32, max_accel: i32) -> Self {
        Self {
            norm,
            exactness: exactness as i64,
            max_accel: max_accel as i64,
        }
    }

    pub fn from_config(config: &TrackballConfig) -> Self {
        Self::new(config.norm, config.exactness, config.max_accel)
    }

    /// Squared distance of the carried motion.
    pub fn distance(&self, stored_dx: i32, stored_dy: i32) -> i64 {
        let dx = stored_dx as i64;
        let dy = stored_dy as i64;
        match self.norm {
            Norm::Euclidean => dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy)),
            Norm::Max => {
                let sum = dx.abs() + dy.abs();
                sum.saturating_mul(sum)
            }
        }
    }

    /// Scale one axis' `delta` according to the carried motion.
    ///
    /// The multiplier never drops below `exactness / 100`, even for zero carried motion.
    /// The result is capped at `8 * max_accel * exactness * delta / 10000`, whose sign follows `delta`.
    pub fn accelerate(&self, stored_dx: i32, stored_dy: i32, delta: i32) -> i32 {
        let delta = delta as i64;
        let square = self.distance(stored_dx, stored_dy);

        let accelerated = ((square - 1).abs() / self.exactness + 1)
            .saturating_mul(self.exactness)
            .saturating_mul(delta)
            / 100;
        let cap = (8 * self.max_accel)
            .saturating_mul(self.exactness)
            .saturating_mul(delta)
            / 10000;

        let result = if accelerated.abs() > cap.abs() { cap } else { accelerated };
        result.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}

/// Splits the carried motion into the part emitted now and the part kept back.
#[derive(Debug, Clone, Copy)]
pub struct InertiaAccumulator {
    inertia_x: i64,
    inertia_y: i64,
}

impl InertiaAccumulator {
    /// Inertia is in percent, per axis
    pub fn new(inertia_x: u8, inertia_y: u8) -> Self {
        Self {
            inertia_x: inertia_x as i64,
            inertia_y: inertia_y as i64,
        }
    }

    pub fn from_config(config: &TrackballConfig) -> Self {
        Self::new(config.x.move_inertia, config.y.move_inertia)
    }

    /// Returns the motion to emit and leaves the kept part in `state`.
    ///
    /// Returns `None` and leaves `state` untouched when there's no carried motion.
    pub fn split(&self, state: &mut MotionState) -> Option<(i32, i32)> {
        if state.is_zero() {
            return None;
        }

        let keep_dx = (self.inertia_x * state.stored_dx as i64 / 100) as i32;
        let keep_dy = (self.inertia_y * state.stored_dy as i64 / 100) as i32;

        let emit = (state.stored_dx - keep_dx, state.stored_dy - keep_dy);
        state.stored_dx = keep_dx;
        state.stored_dy = keep_dy;
        Some(emit)
    }
}
