//! Time-based acceleration ramp.
//!
//! The inter-step delay falls linearly from `target + offset` to `target`
//! over a fixed wall-clock duration. Time, not step count, drives the
//! interpolation, so the ramp length is independent of how fast the loop
//! body runs.

use crate::config::units::{Micros, Millis};
use crate::config::Tuning;

/// Result of a ramp execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampOutcome {
    /// The acceleration window elapsed.
    Completed,
    /// Runout was confirmed mid-ramp.
    Aborted,
}

/// Delay schedule for one ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampProfile {
    /// Delay at elapsed = 0.
    pub start_delay: Micros,
    /// Delay the ramp converges to.
    pub target_delay: Micros,
    /// Length of the ramp.
    pub duration: Millis,
    /// Floor for every delay issued.
    pub min_delay: Micros,
}

impl RampProfile {
    /// Build the profile for `target_delay` from tuning parameters.
    pub fn new(target_delay: Micros, tuning: &Tuning) -> Self {
        Self {
            start_delay: target_delay + tuning.ramp_start_offset,
            target_delay,
            duration: tuning.accel_duration,
            min_delay: tuning.min_step_interval,
        }
    }

    /// Whether the ramp is over at `elapsed`.
    #[inline]
    pub fn is_complete(&self, elapsed: Millis) -> bool {
        elapsed >= self.duration
    }

    /// Delay to use at `elapsed` into the ramp.
    ///
    /// `(1 - p) * start + p * target` with `p = elapsed / duration`,
    /// truncated to whole microseconds and never below `min_delay`.
    /// Non-increasing in `elapsed`.
    pub fn delay_at(&self, elapsed: Millis) -> Micros {
        let span = self.start_delay.0.saturating_sub(self.target_delay.0);
        if self.is_complete(elapsed) || span == 0 {
            return self.target_delay.at_least(self.min_delay);
        }

        // trunc(start - elapsed * span / duration) == start - ceil(elapsed * span / duration),
        // computed exactly in integers.
        let duration = u64::from(self.duration.0);
        let scaled = u64::from(elapsed.0) * u64::from(span);
        let reduction = ((scaled + duration - 1) / duration).min(u64::from(span)) as u32;
        Micros(self.start_delay.0 - reduction).at_least(self.min_delay)
    }
}

/// Live state of a ramp in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampState {
    /// Clock reading when the ramp started.
    pub start_ms: u32,
    /// Cruise delay being ramped to.
    pub target_delay: Micros,
    /// Delay of the most recent step.
    pub current_delay: Micros,
}

impl RampState {
    /// Start a ramp at `now_ms`.
    pub fn begin(now_ms: u32, profile: &RampProfile) -> Self {
        Self {
            start_ms: now_ms,
            target_delay: profile.target_delay,
            current_delay: profile.start_delay.at_least(profile.min_delay),
        }
    }
}
