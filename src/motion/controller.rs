//! Motion controller: ramp, cruise and runout confirmation.

use embedded_hal::pwm::SetDutyCycle;

use crate::config::units::Micros;
use crate::config::{Direction, FeederConfig, Tuning};
use crate::error::Result;
use crate::hal::{elapsed_since, Clock, DigitalSense, InputPanel, InputSample, Motor};
use crate::indicator::IndicatorController;

use super::debounce::DebounceWindow;
use super::ramp::{RampOutcome, RampProfile, RampState};
use super::{MotionRequest, RunOutcome, StopReason};

/// Runs the stepper for one feed request at a time.
///
/// Owns the motor, both inputs and the clock. Every operation blocks until
/// it finishes; stop conditions are polled once per step, so the worst-case
/// stop latency is one step period.
pub struct MotionController<M, S, B, C> {
    motor: M,
    sensor: S,
    button: B,
    clock: C,
    tuning: Tuning,
}

impl<M, S, B, C> MotionController<M, S, B, C>
where
    M: Motor,
    S: DigitalSense,
    B: DigitalSense,
    C: Clock,
{
    /// Create a controller.
    ///
    /// `sensor` is asserted while filament is present; `button` is asserted
    /// while pressed.
    pub fn new(motor: M, sensor: S, button: B, clock: C, tuning: Tuning) -> Self {
        Self {
            motor,
            sensor,
            button,
            clock,
            tuning,
        }
    }

    /// Tuning parameters in use.
    #[inline]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// The motor.
    #[inline]
    pub fn motor(&self) -> &M {
        &self.motor
    }

    /// The motor, mutably.
    #[inline]
    pub fn motor_mut(&mut self) -> &mut M {
        &mut self.motor
    }

    /// Whether filament is present at the sensor.
    pub fn filament_loaded(&mut self) -> Result<bool> {
        self.sensor.is_asserted()
    }

    /// Whether the button is pressed.
    pub fn button_pressed(&mut self) -> Result<bool> {
        self.button.is_asserted()
    }

    /// Current clock reading.
    pub fn now_ms(&mut self) -> u32 {
        self.clock.now_ms()
    }

    /// Debounce an empty sensor reading.
    ///
    /// Keeps stepping at `delay` while sampling the sensor. Returns `false`
    /// as soon as filament is seen again (a glitch), `true` once the debounce
    /// window elapses without it (confirmed runout).
    pub fn confirm_runout(&mut self, delay: Micros) -> Result<bool> {
        let mut window = DebounceWindow::open(self.clock.now_ms(), self.tuning.sensor_debounce);

        while window.is_open(self.clock.now_ms()) {
            self.motor.step(delay)?;
            if self.sensor.is_asserted()? {
                return Ok(false);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::info!("runout confirmed after {=u32} ms", window.elapsed_ms.0);
        Ok(true)
    }

    /// Accelerate towards `target_delay`.
    ///
    /// Issues exactly one step per iteration at the interpolated delay.
    /// Ends when the acceleration window has elapsed, whatever delay was
    /// reached, or earlier if runout is confirmed.
    pub fn ramp(&mut self, target_delay: Micros) -> Result<RampOutcome> {
        let profile = RampProfile::new(target_delay, &self.tuning);
        let mut state = RampState::begin(self.clock.now_ms(), &profile);

        loop {
            let elapsed = elapsed_since(state.start_ms, self.clock.now_ms());
            if profile.is_complete(elapsed) {
                return Ok(RampOutcome::Completed);
            }

            state.current_delay = profile.delay_at(elapsed);

            if !self.sensor.is_asserted()? && self.confirm_runout(state.current_delay)? {
                #[cfg(feature = "defmt")]
                defmt::warn!("ramp aborted at {=u32} us", state.current_delay.0);
                return Ok(RampOutcome::Aborted);
            }

            self.motor.step(state.current_delay)?;
        }
    }

    /// Run at constant `delay` until runout or a user stop.
    ///
    /// A button press only counts as a stop once the stop-hold time has
    /// passed since cruise began, so the press that started the feed does
    /// not immediately end it. The LED for `direction` blinks throughout.
    pub fn cruise<L, R>(
        &mut self,
        delay: Micros,
        direction: Direction,
        indicator: &mut IndicatorController<L, R>,
    ) -> Result<StopReason>
    where
        L: SetDutyCycle,
        R: SetDutyCycle,
    {
        let start = self.clock.now_ms();

        loop {
            if !self.sensor.is_asserted()? && self.confirm_runout(delay)? {
                return Ok(StopReason::Runout);
            }

            let now = self.clock.now_ms();
            let hold_elapsed = elapsed_since(start, now) > self.tuning.cruise_stop_hold;
            if self.button.is_asserted()? && hold_elapsed {
                #[cfg(feature = "defmt")]
                defmt::info!("cruise stopped by button");
                return Ok(StopReason::UserStop);
            }

            indicator.blink(direction, now)?;
            self.motor.step(delay)?;
        }
    }

    /// Execute one feed request end to end.
    ///
    /// Points the motor, energizes it, ramps and then cruises. A ramp abort
    /// skips the cruise. The motor is released on every exit path, errors
    /// included.
    pub fn run<L, R>(
        &mut self,
        config: &FeederConfig,
        indicator: &mut IndicatorController<L, R>,
    ) -> Result<RunOutcome>
    where
        L: SetDutyCycle,
        R: SetDutyCycle,
    {
        let request = MotionRequest::from(config);

        let outcome = self.execute(&request, indicator);
        let released = self.motor.disable();

        let outcome = outcome?;
        released?;
        Ok(outcome)
    }

    fn execute<L, R>(
        &mut self,
        request: &MotionRequest,
        indicator: &mut IndicatorController<L, R>,
    ) -> Result<RunOutcome>
    where
        L: SetDutyCycle,
        R: SetDutyCycle,
    {
        self.motor.set_direction(request.direction)?;
        self.motor.enable()?;

        if self.ramp(request.cruise_delay)? == RampOutcome::Aborted {
            return Ok(RunOutcome::RampAborted);
        }

        let reason = self.cruise(request.cruise_delay, request.direction, indicator)?;
        Ok(RunOutcome::Stopped(reason))
    }

    /// Release the owned parts.
    pub fn release(self) -> (M, S, B, C) {
        (self.motor, self.sensor, self.button, self.clock)
    }
}

impl<M, S, B, C> InputPanel for MotionController<M, S, B, C>
where
    M: Motor,
    S: DigitalSense,
    B: DigitalSense,
    C: Clock,
{
    fn sample(&mut self) -> Result<InputSample> {
        Ok(InputSample {
            button_pressed: self.button.is_asserted()?,
            filament_loaded: self.sensor.is_asserted()?,
            now_ms: self.clock.now_ms(),
        })
    }
}
