//! Motor module for filament-feeder.
//!
//! Provides the step/dir/enable stepper driver.

mod driver;

pub use driver::StepperDriver;
