//! Hardware boundary: clock, step pulses and active-low inputs.
//!
//! Everything timing-dependent reads time through [`Clock`], so tests can
//! drive ramps, debounce windows and long presses with a virtual clock.

use embedded_hal::digital::InputPin;

use crate::config::units::{Micros, Millis};
use crate::config::Direction;
use crate::error::{InputError, Result};

/// A monotonic millisecond clock.
///
/// The counter is allowed to wrap. Never subtract two readings directly;
/// use [`elapsed_since`] instead.
pub trait Clock {
    /// Current reading in milliseconds.
    fn now_ms(&mut self) -> u32;
}

impl<F> Clock for F
where
    F: FnMut() -> u32,
{
    fn now_ms(&mut self) -> u32 {
        self()
    }
}

/// Milliseconds from `start` to `now`, correct across counter wraparound.
#[inline]
pub fn elapsed_since(start: u32, now: u32) -> Millis {
    Millis(now.wrapping_sub(start))
}

/// Anything that can emit a single step pulse.
pub trait StepPulse {
    /// Emit one pulse: step line high for `half_period`, then low for
    /// `half_period`.
    fn step(&mut self, half_period: Micros) -> Result<()>;
}

/// A stepper that can be energized and pointed in a direction.
pub trait Motor: StepPulse {
    /// Energize the coils.
    fn enable(&mut self) -> Result<()>;

    /// Release the coils.
    fn disable(&mut self) -> Result<()>;

    /// Select the feed direction for subsequent steps.
    fn set_direction(&mut self, direction: Direction) -> Result<()>;
}

/// A binary input that is either asserted or not.
pub trait DigitalSense {
    /// Whether the input is currently asserted.
    fn is_asserted(&mut self) -> Result<bool>;
}

impl<F> DigitalSense for F
where
    F: FnMut() -> bool,
{
    fn is_asserted(&mut self) -> Result<bool> {
        Ok(self())
    }
}

/// Button and sensor read at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSample {
    /// Button is pressed.
    pub button_pressed: bool,
    /// Filament is present at the sensor.
    pub filament_loaded: bool,
    /// Clock reading taken with the sample.
    pub now_ms: u32,
}

/// Source of timestamped button/sensor samples.
pub trait InputPanel {
    /// Read both inputs and the clock.
    fn sample(&mut self) -> Result<InputSample>;
}

/// Input with a pull-up where a logical low means asserted.
///
/// Both the button (pressed) and the filament switch (loaded) pull their
/// line low when active.
pub struct ActiveLow<P> {
    pin: P,
    error: InputError,
}

impl<P: InputPin> ActiveLow<P> {
    /// Wrap the button pin.
    pub fn button(pin: P) -> Self {
        Self {
            pin,
            error: InputError::Button,
        }
    }

    /// Wrap the filament sensor pin.
    pub fn sensor(pin: P) -> Self {
        Self {
            pin,
            error: InputError::Sensor,
        }
    }

    /// Release the wrapped pin.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> DigitalSense for ActiveLow<P> {
    fn is_asserted(&mut self) -> Result<bool> {
        let error = self.error;
        self.pin.is_low().map_err(|_| error.into())
    }
}

/// Monotonic clock backed by the operating system.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct SystemClock {
    created_at: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Start a clock reading zero now.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self {
            created_at: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now_ms(&mut self) -> u32 {
        // Truncation wraps the counter like a hardware tick register.
        self.created_at.elapsed().as_millis() as u32
    }
}
