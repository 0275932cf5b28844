//! Stepper motor driver.
//!
//! Generic over embedded-hal 1.0 pin types. Drives a step/dir driver board
//! with an active-low enable line (A4988, DRV8825 and friends).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::Micros;
use crate::config::Direction;
use crate::error::{MotorError, Result};
use crate::hal::{Motor, StepPulse};

/// Stepper motor driver.
///
/// Generic over:
/// - `EN`: enable pin type, active low (must implement `OutputPin`)
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `DELAY`: Delay provider (must implement `DelayNs`)
pub struct StepperDriver<EN, STEP, DIR, DELAY>
where
    EN: OutputPin,
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    /// Enable pin (low = coils energized).
    enable_pin: EN,

    /// STEP pin (pulse to move one step).
    step_pin: STEP,

    /// DIR pin (high = forward, unless inverted).
    dir_pin: DIR,

    /// Delay provider for step timing.
    delay: DELAY,

    /// Whether the coils are energized.
    enabled: bool,

    /// Current direction (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// Pulses emitted since creation or the last reset.
    steps_taken: u64,
}

impl<EN, STEP, DIR, DELAY> StepperDriver<EN, STEP, DIR, DELAY>
where
    EN: OutputPin,
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    /// Create a driver. The motor is assumed disabled until [`disable`] or
    /// [`enable`] writes the enable line.
    ///
    /// [`disable`]: Self::disable
    /// [`enable`]: Self::enable
    pub fn new(enable_pin: EN, step_pin: STEP, dir_pin: DIR, delay: DELAY) -> Self {
        Self {
            enable_pin,
            step_pin,
            dir_pin,
            delay,
            enabled: false,
            current_direction: None,
            invert_direction: false,
            steps_taken: 0,
        }
    }

    /// Invert the direction pin logic (for motors wired the other way round).
    pub fn with_inverted_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Energize the coils.
    pub fn enable(&mut self) -> Result<()> {
        self.enable_pin
            .set_low()
            .map_err(|_| MotorError::EnablePin)?;
        self.enabled = true;
        Ok(())
    }

    /// Release the coils.
    pub fn disable(&mut self) -> Result<()> {
        self.enable_pin
            .set_high()
            .map_err(|_| MotorError::EnablePin)?;
        self.enabled = false;
        Ok(())
    }

    /// Whether the coils are energized.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the DIR line for `direction`. Skips the pin write if unchanged.
    pub fn set_direction(&mut self, direction: Direction) -> Result<()> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let pin_high = match direction {
            Direction::Forward => !self.invert_direction,
            Direction::Reverse => self.invert_direction,
        };

        if pin_high {
            self.dir_pin.set_high().map_err(|_| MotorError::DirectionPin)?;
        } else {
            self.dir_pin.set_low().map_err(|_| MotorError::DirectionPin)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }

    /// Last direction written to the DIR line.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.current_direction
    }

    /// Pulses emitted since creation or the last [`reset_steps`](Self::reset_steps).
    #[inline]
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Reset the pulse counter.
    pub fn reset_steps(&mut self) {
        self.steps_taken = 0;
    }

    /// Release the pins and delay provider.
    pub fn release(self) -> (EN, STEP, DIR, DELAY) {
        (self.enable_pin, self.step_pin, self.dir_pin, self.delay)
    }
}

impl<EN, STEP, DIR, DELAY> StepPulse for StepperDriver<EN, STEP, DIR, DELAY>
where
    EN: OutputPin,
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    fn step(&mut self, half_period: Micros) -> Result<()> {
        self.step_pin.set_high().map_err(|_| MotorError::StepPin)?;
        self.delay.delay_us(half_period.0);
        self.step_pin.set_low().map_err(|_| MotorError::StepPin)?;
        self.delay.delay_us(half_period.0);

        self.steps_taken += 1;
        Ok(())
    }
}

impl<EN, STEP, DIR, DELAY> Motor for StepperDriver<EN, STEP, DIR, DELAY>
where
    EN: OutputPin,
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    fn enable(&mut self) -> Result<()> {
        StepperDriver::enable(self)
    }

    fn disable(&mut self) -> Result<()> {
        StepperDriver::disable(self)
    }

    fn set_direction(&mut self, direction: Direction) -> Result<()> {
        StepperDriver::set_direction(self, direction)
    }
}
