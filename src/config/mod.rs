//! Configuration module for filament-feeder.
//!
//! Holds the persisted user selection ([`FeederConfig`]), the timing
//! parameters ([`Tuning`]) and the persistence boundary ([`ConfigStore`]).
//! With the `std` feature, both can be read from TOML files.

mod feeder;
#[cfg(feature = "std")]
mod loader;
mod store;
mod tuning;
pub mod units;
mod validation;

pub use feeder::{Direction, FeederConfig, SpeedLevel};
pub use store::{ConfigStore, MemoryStore};
pub use tuning::{Tuning, DEFAULT_LED_BRIGHTNESS, DEFAULT_LED_DUTY_RANGE};
pub use validation::validate_tuning;

#[cfg(feature = "std")]
pub use loader::{load_tuning, parse_feeder_config, parse_tuning, render_feeder_config, FileStore};

// Re-export unit types at config level
pub use units::{Micros, Millis};
