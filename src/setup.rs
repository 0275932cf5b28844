//! Startup configuration phase.
//!
//! For a fixed number of indicator cycles the LEDs flash the selected speed
//! level. A short press advances the speed level, a long press with no
//! filament loaded reverses the feed direction. Every change is persisted
//! immediately.

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;

use crate::button::{ButtonEvent, ButtonStateMachine};
use crate::config::units::Millis;
use crate::config::{ConfigStore, FeederConfig, Tuning};
use crate::error::Result;
use crate::hal::{InputPanel, InputSample};
use crate::indicator::IndicatorController;

/// Changes made during one configuration phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetupReport {
    /// Short presses handled (speed level advanced).
    pub speed_changes: u8,
    /// Long presses handled (direction reversed).
    pub direction_changes: u8,
}

impl SetupReport {
    /// Number of times the configuration was saved.
    pub fn saves(&self) -> u8 {
        self.speed_changes.saturating_add(self.direction_changes)
    }
}

/// The configuration phase run once at startup.
#[derive(Debug, Clone)]
pub struct SetupSequence {
    machine: ButtonStateMachine,
    cycles: u8,
    half_cycle: Millis,
}

impl SetupSequence {
    /// Build the sequence from tuning parameters.
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            machine: ButtonStateMachine::new(tuning.long_press),
            cycles: tuning.setup_cycles,
            half_cycle: tuning.setup_half_cycle,
        }
    }

    /// Feed one end-of-cycle sample and apply the resulting event to
    /// `config`.
    pub fn apply(&mut self, sample: InputSample, config: &mut FeederConfig) -> Option<ButtonEvent> {
        let event = self
            .machine
            .update(sample.button_pressed, sample.filament_loaded, sample.now_ms)?;

        match event {
            ButtonEvent::ShortPress => config.cycle_speed(),
            ButtonEvent::LongPress => config.toggle_direction(),
        }
        Some(event)
    }

    /// Run every cycle of the configuration phase.
    ///
    /// Each cycle shows the speed level for one half-cycle, blanks the LEDs
    /// for the other, then samples the inputs. Both LEDs are off on return
    /// unless the final cycle reversed the direction.
    pub fn run<P, D, L, R, ST>(
        &mut self,
        panel: &mut P,
        delay: &mut D,
        indicator: &mut IndicatorController<L, R>,
        config: &mut FeederConfig,
        store: &mut ST,
    ) -> Result<SetupReport>
    where
        P: InputPanel,
        D: DelayNs,
        L: SetDutyCycle,
        R: SetDutyCycle,
        ST: ConfigStore,
    {
        let mut report = SetupReport::default();
        indicator.clear()?;

        for _ in 0..self.cycles {
            indicator.show_speed_level(config.speed_level)?;
            delay.delay_ms(self.half_cycle.0);
            indicator.clear()?;
            delay.delay_ms(self.half_cycle.0);

            let sample = panel.sample()?;
            match self.apply(sample, config) {
                Some(ButtonEvent::ShortPress) => {
                    store.save(config)?;
                    report.speed_changes += 1;
                    #[cfg(feature = "defmt")]
                    defmt::info!("speed level -> {}", config.speed_level);
                }
                Some(ButtonEvent::LongPress) => {
                    store.save(config)?;
                    indicator.show_direction(config.direction)?;
                    report.direction_changes += 1;
                    #[cfg(feature = "defmt")]
                    defmt::info!("direction -> {}", config.direction);
                }
                None => {}
            }
        }

        Ok(report)
    }
}
