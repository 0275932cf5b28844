//! Motion module for filament-feeder.
//!
//! Provides the acceleration ramp, the runout debounce window and the
//! controller that runs a feed request end to end.

mod controller;
mod debounce;
mod ramp;

pub use controller::MotionController;
pub use debounce::DebounceWindow;
pub use ramp::{RampOutcome, RampProfile, RampState};

use crate::config::units::Micros;
use crate::config::{Direction, FeederConfig};

/// One feed request, resolved from the configuration when the run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionRequest {
    /// Cruise half-period from the speed table.
    pub cruise_delay: Micros,
    /// Feed direction.
    pub direction: Direction,
}

impl From<&FeederConfig> for MotionRequest {
    fn from(config: &FeederConfig) -> Self {
        Self {
            cruise_delay: config.cruise_delay(),
            direction: config.direction,
        }
    }
}

/// Why a cruise ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopReason {
    /// Filament runout was confirmed.
    Runout,
    /// The button was held past the stop-hold time.
    UserStop,
}

/// How a feed request ended. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunOutcome {
    /// Runout was confirmed during acceleration; no cruise took place.
    RampAborted,
    /// The cruise ran and then stopped.
    Stopped(StopReason),
}

impl RunOutcome {
    /// Whether the run ended because filament ran out.
    pub fn is_runout(self) -> bool {
        matches!(self, RunOutcome::RampAborted | RunOutcome::Stopped(StopReason::Runout))
    }
}
