//! Tuning validation.

use crate::error::{ConfigError, Error, Result};

use super::Tuning;

/// Validate a tuning document.
///
/// Checks:
/// - Every duration that paces a loop is non-zero
/// - The minimum step interval is non-zero
/// - LED brightness fits the duty range
/// - The configuration phase has at least one cycle
pub fn validate_tuning(tuning: &Tuning) -> Result<()> {
    let durations = [
        ("accel_duration_ms", tuning.accel_duration),
        ("sensor_debounce_ms", tuning.sensor_debounce),
        ("long_press_ms", tuning.long_press),
        ("cruise_stop_hold_ms", tuning.cruise_stop_hold),
        ("blink_period_ms", tuning.blink_period),
        ("setup_half_cycle_ms", tuning.setup_half_cycle),
    ];

    for (name, duration) in durations {
        if duration.is_zero() {
            return Err(Error::Config(ConfigError::ZeroDuration(name)));
        }
    }

    if tuning.min_step_interval.0 == 0 {
        return Err(Error::Config(ConfigError::ZeroDuration("min_step_interval_us")));
    }

    if tuning.led_duty_range == 0 || tuning.led_brightness > tuning.led_duty_range {
        return Err(Error::Config(ConfigError::InvalidBrightness {
            brightness: tuning.led_brightness,
            range: tuning.led_duty_range,
        }));
    }

    if tuning.setup_cycles == 0 {
        return Err(Error::Config(ConfigError::ZeroCount("setup_cycles")));
    }

    Ok(())
}
