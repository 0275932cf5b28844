//! Top-level feeder: configuration phase plus the idle loop.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;

use crate::config::{ConfigStore, FeederConfig};
use crate::error::Result;
use crate::hal::{Clock, DigitalSense, Motor};
use crate::indicator::IndicatorController;
use crate::motion::{MotionController, RunOutcome};
use crate::setup::{SetupReport, SetupSequence};

/// The whole feeder.
///
/// Owns the configuration store and the loaded configuration, the motion
/// controller (motor, inputs, clock) and the indicator. Feed requests are
/// strictly serialized: [`poll`](Self::poll) blocks for the full duration
/// of a run, so nothing else touches the pins or the configuration while
/// the motor moves.
///
/// # Example
///
/// ```rust,ignore
/// use filament_feeder::{
///     ActiveLow, Feeder, FileStore, IndicatorController, MotionController, StepperDriver, Tuning,
/// };
///
/// let tuning = Tuning::default();
/// let motor = StepperDriver::new(en, step, dir, delay);
/// let motion = MotionController::new(
///     motor,
///     ActiveLow::sensor(sensor_pin),
///     ActiveLow::button(button_pin),
///     clock,
///     tuning.clone(),
/// );
/// let indicator = IndicatorController::new(led_left, led_right, &tuning);
///
/// let mut feeder = Feeder::new(FileStore::new("feeder.toml"), motion, indicator);
/// feeder.startup(&mut setup_delay)?;
/// feeder.run_forever()?;
/// ```
pub struct Feeder<ST, M, S, B, C, L, R>
where
    L: SetDutyCycle,
    R: SetDutyCycle,
{
    store: ST,
    config: FeederConfig,
    motion: MotionController<M, S, B, C>,
    indicator: IndicatorController<L, R>,
}

impl<ST, M, S, B, C, L, R> Feeder<ST, M, S, B, C, L, R>
where
    ST: ConfigStore,
    M: Motor,
    S: DigitalSense,
    B: DigitalSense,
    C: Clock,
    L: SetDutyCycle,
    R: SetDutyCycle,
{
    /// Assemble a feeder. The configuration stays at its default until
    /// [`startup`](Self::startup) loads it.
    pub fn new(
        store: ST,
        motion: MotionController<M, S, B, C>,
        indicator: IndicatorController<L, R>,
    ) -> Self {
        Self {
            store,
            config: FeederConfig::default(),
            motion,
            indicator,
        }
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &FeederConfig {
        &self.config
    }

    /// The configuration store.
    #[inline]
    pub fn store(&self) -> &ST {
        &self.store
    }

    /// The motion controller.
    #[inline]
    pub fn motion(&self) -> &MotionController<M, S, B, C> {
        &self.motion
    }

    /// The indicator.
    #[inline]
    pub fn indicator(&self) -> &IndicatorController<L, R> {
        &self.indicator
    }

    /// Load the configuration, park the motor and run the configuration
    /// phase. `delay` paces the indicator cycles.
    pub fn startup<D: DelayNs>(&mut self, delay: &mut D) -> Result<SetupReport> {
        self.config = self.store.load()?;

        self.motion.motor_mut().disable()?;
        self.motion.motor_mut().set_direction(self.config.direction)?;

        let mut setup = SetupSequence::new(self.motion.tuning());
        let report = setup.run(
            &mut self.motion,
            delay,
            &mut self.indicator,
            &mut self.config,
            &mut self.store,
        )?;

        self.motion.motor_mut().set_direction(self.config.direction)?;
        self.indicator.show_direction(self.config.direction)?;
        Ok(report)
    }

    /// One idle-loop iteration.
    ///
    /// Keeps the motor released. With filament loaded, shows the direction
    /// and starts a run if the button is pressed; without filament, blanks
    /// the LEDs. Returns the outcome if a run took place.
    pub fn poll(&mut self) -> Result<Option<RunOutcome>> {
        self.motion.motor_mut().disable()?;

        if !self.motion.filament_loaded()? {
            self.indicator.clear()?;
            return Ok(None);
        }

        self.indicator.show_direction(self.config.direction)?;
        if !self.motion.button_pressed()? {
            return Ok(None);
        }

        let outcome = self.motion.run(&self.config, &mut self.indicator)?;
        self.indicator.show_direction(self.config.direction)?;
        Ok(Some(outcome))
    }

    /// Poll forever. Only returns on a hardware or storage error.
    pub fn run_forever(&mut self) -> Result<Infallible> {
        loop {
            self.poll()?;
        }
    }

    /// Release the owned parts.
    pub fn release(self) -> (ST, MotionController<M, S, B, C>, IndicatorController<L, R>) {
        (self.store, self.motion, self.indicator)
    }
}
