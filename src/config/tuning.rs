//! Timing and brightness parameters.

use serde::Deserialize;

use super::units::{Micros, Millis};

/// Default LED brightness on a 0..=1023 duty scale.
pub const DEFAULT_LED_BRIGHTNESS: u16 = 50;

/// Default duty range the brightness is expressed in.
pub const DEFAULT_LED_DUTY_RANGE: u16 = 1023;

/// Timing and brightness parameters for the feeder.
///
/// Every field has a default, so a tuning document only needs to name the
/// values it overrides:
///
/// ```toml
/// accel_duration_ms = 1500
/// sensor_debounce_ms = 200
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Added to the cruise delay to get the ramp's starting delay.
    #[serde(rename = "ramp_start_offset_us")]
    pub ramp_start_offset: Micros,

    /// Wall-clock length of the acceleration ramp.
    #[serde(rename = "accel_duration_ms")]
    pub accel_duration: Millis,

    /// Shortest step half-period ever issued.
    #[serde(rename = "min_step_interval_us")]
    pub min_step_interval: Micros,

    /// How long the sensor must stay empty before runout is confirmed.
    #[serde(rename = "sensor_debounce_ms")]
    pub sensor_debounce: Millis,

    /// Hold time for a configuration long press.
    #[serde(rename = "long_press_ms")]
    pub long_press: Millis,

    /// Button hold time that stops a cruise, measured from cruise start.
    #[serde(rename = "cruise_stop_hold_ms")]
    pub cruise_stop_hold: Millis,

    /// Half-period of the direction LED blink while cruising.
    #[serde(rename = "blink_period_ms")]
    pub blink_period: Millis,

    /// Lit LED brightness, in units of `led_duty_range`.
    pub led_brightness: u16,

    /// Full-scale value `led_brightness` is expressed against.
    pub led_duty_range: u16,

    /// Number of indicator cycles in the startup configuration phase.
    pub setup_cycles: u8,

    /// On and off time of one configuration indicator cycle.
    #[serde(rename = "setup_half_cycle_ms")]
    pub setup_half_cycle: Millis,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ramp_start_offset: Micros(300),
            accel_duration: Millis(2000),
            min_step_interval: Micros(100),
            sensor_debounce: Millis(150),
            long_press: Millis(2000),
            cruise_stop_hold: Millis(1000),
            blink_period: Millis(500),
            led_brightness: DEFAULT_LED_BRIGHTNESS,
            led_duty_range: DEFAULT_LED_DUTY_RANGE,
            setup_cycles: 6,
            setup_half_cycle: Millis(250),
        }
    }
}

impl Tuning {
    /// Length of one full configuration indicator cycle.
    #[inline]
    pub fn setup_cycle(&self) -> Millis {
        Millis(self.setup_half_cycle.0.saturating_mul(2))
    }
}
