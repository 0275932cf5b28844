//! # filament-feeder
//!
//! Motion-control core for an automated filament feeder with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Time-based acceleration**: Linear ramp from a slow start delay to the cruise delay
//! - **Runout debounce**: Sensor glitches are absorbed without stalling the motor
//! - **One-button configuration**: Short press cycles speed, long press reverses direction
//! - **embedded-hal 1.0**: `OutputPin` for enable/STEP/DIR, `InputPin` for button and
//!   sensor, `SetDutyCycle` for the indicator LEDs, `DelayNs` for pulse timing
//! - **Injectable clock**: All timing reads go through [`Clock`], so behaviour is
//!   testable without real delays
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use filament_feeder::{FeederConfig, MotionController, StepperDriver, Tuning};
//!
//! let motor = StepperDriver::new(en, step, dir, delay);
//! let mut motion = MotionController::new(motor, sensor, button, clock, Tuning::default());
//!
//! // Ramp up, then cruise until runout or a long button hold
//! let outcome = motion.run(&FeederConfig::default(), &mut indicator)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file-backed configuration and TOML tuning files
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Core modules
pub mod button;
pub mod config;
pub mod error;
pub mod feeder;
pub mod hal;
pub mod indicator;
pub mod motion;
pub mod motor;
pub mod setup;

// Re-exports for ergonomic API
pub use button::{ButtonEvent, ButtonStateMachine, PressState};
pub use config::{
    validate_tuning, ConfigStore, Direction, FeederConfig, MemoryStore, SpeedLevel, Tuning,
};
pub use error::{Error, Result};
pub use feeder::Feeder;
pub use hal::{ActiveLow, Clock, DigitalSense, InputPanel, InputSample, Motor, StepPulse};
pub use indicator::IndicatorController;
pub use motion::{MotionController, MotionRequest, RampOutcome, RunOutcome, StopReason};
pub use motor::StepperDriver;
pub use setup::{SetupReport, SetupSequence};

// File-backed configuration (std only)
#[cfg(feature = "std")]
pub use config::{load_tuning, FileStore};
#[cfg(feature = "std")]
pub use hal::SystemClock;

// Unit types
pub use config::units::{Micros, Millis};
