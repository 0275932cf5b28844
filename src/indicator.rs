//! Two-LED status indicator.
//!
//! The left LED stands for [`Direction::Forward`], the right one for
//! [`Direction::Reverse`]. LEDs are either off or at a single fixed
//! brightness; intermediate levels are never used.

use embedded_hal::pwm::SetDutyCycle;

use crate::config::units::Millis;
use crate::config::{Direction, SpeedLevel, Tuning};
use crate::error::{IndicatorError, Result};
use crate::hal::elapsed_since;

/// One LED channel with its blink timer.
///
/// PWM outputs cannot be read back, so the lit state is tracked here.
struct Led<P> {
    pwm: P,
    lit: bool,
    last_toggle_ms: Option<u32>,
}

impl<P: SetDutyCycle> Led<P> {
    fn new(pwm: P) -> Self {
        Self {
            pwm,
            lit: false,
            last_toggle_ms: None,
        }
    }

    fn set(&mut self, on: bool, brightness: u16, range: u16) -> Result<()> {
        let result = if on {
            self.pwm.set_duty_cycle_fraction(brightness, range)
        } else {
            self.pwm.set_duty_cycle_fully_off()
        };
        result.map_err(|_| IndicatorError::DutyCycle)?;
        self.lit = on;
        Ok(())
    }
}

/// Drives the two indicator LEDs.
pub struct IndicatorController<L, R>
where
    L: SetDutyCycle,
    R: SetDutyCycle,
{
    left: Led<L>,
    right: Led<R>,
    brightness: u16,
    duty_range: u16,
    blink_period: Millis,
}

impl<L, R> IndicatorController<L, R>
where
    L: SetDutyCycle,
    R: SetDutyCycle,
{
    /// Create a controller. Both LEDs are assumed off.
    pub fn new(left: L, right: R, tuning: &Tuning) -> Self {
        Self {
            left: Led::new(left),
            right: Led::new(right),
            brightness: tuning.led_brightness,
            duty_range: tuning.led_duty_range,
            blink_period: tuning.blink_period,
        }
    }

    fn set_pair(&mut self, left: bool, right: bool) -> Result<()> {
        let (brightness, range) = (self.brightness, self.duty_range);
        self.left.set(left, brightness, range)?;
        self.right.set(right, brightness, range)
    }

    /// Light the LED for `direction` and turn the other one off.
    pub fn show_direction(&mut self, direction: Direction) -> Result<()> {
        match direction {
            Direction::Forward => self.set_pair(true, false),
            Direction::Reverse => self.set_pair(false, true),
        }
    }

    /// Turn both LEDs off.
    pub fn clear(&mut self) -> Result<()> {
        self.set_pair(false, false)
    }

    /// Show a speed level: left for Slow, right for Fast, neither for Normal.
    pub fn show_speed_level(&mut self, level: SpeedLevel) -> Result<()> {
        self.set_pair(level == SpeedLevel::Slow, level == SpeedLevel::Fast)
    }

    /// Toggle the LED for `direction` if a full blink period has passed
    /// since that LED last toggled. The first call always toggles.
    ///
    /// Returns whether the LED toggled.
    pub fn blink(&mut self, direction: Direction, now_ms: u32) -> Result<bool> {
        let (brightness, range, period) = (self.brightness, self.duty_range, self.blink_period);
        match direction {
            Direction::Forward => blink_led(&mut self.left, now_ms, period, brightness, range),
            Direction::Reverse => blink_led(&mut self.right, now_ms, period, brightness, range),
        }
    }

    /// Whether the left (forward) LED is lit.
    #[inline]
    pub fn left_lit(&self) -> bool {
        self.left.lit
    }

    /// Whether the right (reverse) LED is lit.
    #[inline]
    pub fn right_lit(&self) -> bool {
        self.right.lit
    }

    /// Release the PWM outputs.
    pub fn release(self) -> (L, R) {
        (self.left.pwm, self.right.pwm)
    }
}

fn blink_led<P: SetDutyCycle>(
    led: &mut Led<P>,
    now_ms: u32,
    period: Millis,
    brightness: u16,
    range: u16,
) -> Result<bool> {
    let due = match led.last_toggle_ms {
        Some(last) => elapsed_since(last, now_ms) >= period,
        None => true,
    };
    if !due {
        return Ok(false);
    }

    led.last_toggle_ms = Some(now_ms);
    let on = !led.lit;
    led.set(on, brightness, range)?;
    Ok(true)
}
