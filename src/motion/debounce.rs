//! Time-domain debounce for the filament sensor.

use crate::config::units::Millis;
use crate::hal::elapsed_since;

/// Window opened when the sensor first reports empty.
///
/// The window is time-based rather than sample-count based, so the verdict
/// does not depend on how long each step takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceWindow {
    /// Clock reading when the sensor first read empty.
    pub window_start_ms: u32,
    /// Time since `window_start_ms` at the most recent check.
    pub elapsed_ms: Millis,
    length: Millis,
}

impl DebounceWindow {
    /// Open a window of `length` at `now_ms`.
    pub fn open(now_ms: u32, length: Millis) -> Self {
        Self {
            window_start_ms: now_ms,
            elapsed_ms: Millis(0),
            length,
        }
    }

    /// Update the elapsed time and report whether the window is still open.
    pub fn is_open(&mut self, now_ms: u32) -> bool {
        self.elapsed_ms = elapsed_since(self.window_start_ms, now_ms);
        self.elapsed_ms < self.length
    }

    /// Configured window length.
    #[inline]
    pub fn length(&self) -> Millis {
        self.length
    }
}
