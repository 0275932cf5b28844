//! Button press classification for the configuration phase.
//!
//! The state machine is sampled at a coarse rate (once per indicator
//! cycle) and turns press/hold/release into at most one event per sample.

use crate::config::units::Millis;
use crate::hal::elapsed_since;

/// What the button is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressState {
    /// Not pressed.
    #[default]
    Released,
    /// Pressed, long-press threshold not reached yet.
    PressedShort {
        /// Clock reading when the press was first seen.
        since_ms: u32,
        /// Whether filament was seen at any sample during this hold.
        saw_filament: bool,
    },
    /// Long press already fired for this hold; waiting for release.
    PressedLong,
}

/// A classified gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Pressed and released before the long-press threshold.
    ShortPress,
    /// Held past the threshold with no filament in the sensor.
    LongPress,
}

/// Short/long press state machine.
///
/// | state          | pressed | condition                     | next           | event        |
/// |----------------|---------|-------------------------------|----------------|--------------|
/// | `Released`     | yes     |                               | `PressedShort` |              |
/// | `PressedShort` | yes     | held > threshold, no filament | `PressedLong`  | `LongPress`  |
/// | `PressedShort` | no      |                               | `Released`     | `ShortPress` |
/// | `PressedLong`  | no      |                               | `Released`     |              |
#[derive(Debug, Clone)]
pub struct ButtonStateMachine {
    state: PressState,
    long_press: Millis,
}

impl ButtonStateMachine {
    /// Create a machine with the given long-press threshold.
    pub const fn new(long_press: Millis) -> Self {
        Self {
            state: PressState::Released,
            long_press,
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> PressState {
        self.state
    }

    /// Feed one sample.
    ///
    /// `sensor_loaded` is the filament sensor reading at the same instant;
    /// a long press never fires for a hold during which filament was seen.
    pub fn update(
        &mut self,
        pressed: bool,
        sensor_loaded: bool,
        now_ms: u32,
    ) -> Option<ButtonEvent> {
        match (self.state, pressed) {
            (PressState::Released, true) => {
                self.state = PressState::PressedShort {
                    since_ms: now_ms,
                    saw_filament: sensor_loaded,
                };
                None
            }
            (PressState::Released, false) => None,
            (PressState::PressedShort { since_ms, saw_filament }, true) => {
                let saw_filament = saw_filament || sensor_loaded;
                if !saw_filament && elapsed_since(since_ms, now_ms) > self.long_press {
                    self.state = PressState::PressedLong;
                    Some(ButtonEvent::LongPress)
                } else {
                    self.state = PressState::PressedShort { since_ms, saw_filament };
                    None
                }
            }
            (PressState::PressedShort { .. }, false) => {
                self.state = PressState::Released;
                Some(ButtonEvent::ShortPress)
            }
            (PressState::PressedLong, true) => None,
            (PressState::PressedLong, false) => {
                self.state = PressState::Released;
                None
            }
        }
    }

    /// Forget any press in progress.
    pub fn reset(&mut self) {
        self.state = PressState::Released;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> ButtonStateMachine {
        ButtonStateMachine::new(Millis(2000))
    }

    #[test]
    fn test_short_press_fires_on_release() {
        let mut m = machine();
        assert_eq!(m.update(true, false, 0), None);
        assert_eq!(m.update(true, false, 500), None);
        assert_eq!(m.update(false, false, 1000), Some(ButtonEvent::ShortPress));
        assert_eq!(m.state(), PressState::Released);
    }

    #[test]
    fn test_idle_release_is_not_a_press() {
        let mut m = machine();
        assert_eq!(m.update(false, false, 0), None);
        assert_eq!(m.update(false, false, 500), None);
    }

    #[test]
    fn test_long_press_fires_once_per_hold() {
        let mut m = machine();
        m.update(true, false, 0);
        assert_eq!(m.update(true, false, 2000), None);
        assert_eq!(m.update(true, false, 2500), Some(ButtonEvent::LongPress));
        assert_eq!(m.update(true, false, 3000), None);
        assert_eq!(m.update(true, false, 6000), None);
        // Releasing after a long press is not a short press.
        assert_eq!(m.update(false, false, 6500), None);

        m.update(true, false, 7000);
        assert_eq!(m.update(true, false, 9500), Some(ButtonEvent::LongPress));
    }

    #[test]
    fn test_long_press_blocked_by_filament_anywhere_in_hold() {
        let mut m = machine();
        m.update(true, false, 0);
        m.update(true, true, 500);
        assert_eq!(m.update(true, false, 2500), None);
        assert_eq!(m.update(true, false, 3000), None);
        // The hold still ends as a short press.
        assert_eq!(m.update(false, false, 3500), Some(ButtonEvent::ShortPress));
    }

    #[test]
    fn test_long_press_with_filament_loaded() {
        let mut m = machine();
        for t in (0..=3000).step_by(500) {
            assert_eq!(m.update(true, true, t), None);
        }
    }

    #[test]
    fn test_threshold_across_clock_wrap() {
        let mut m = machine();
        let start = u32::MAX - 1000;
        m.update(true, false, start);
        assert_eq!(m.update(true, false, start.wrapping_add(2001)), Some(ButtonEvent::LongPress));
    }

    #[test]
    fn test_reset() {
        let mut m = machine();
        m.update(true, false, 0);
        m.reset();
        assert_eq!(m.update(false, false, 100), None);
    }
}
