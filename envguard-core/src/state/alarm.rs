//! Alarm enable/pause state
//!
//! Two flags collapse into three effective modes:
//!
//! ```text
//!            toggle                 pause
//! Disabled <--------> Enabled ----------------> EnabledPaused
//!                        ^                           |
//!                        +------ pause expired ------+
//! ```
//!
//! The pause flag can also be set while disabled. It then has no
//! observable effect and expires silently.

/// Effective alarm mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmMode {
    /// Alarm off; no warning beeps
    Disabled,
    /// Alarm armed; temperature warnings beep
    Enabled,
    /// Alarm armed but silenced until the pause expires
    EnabledPaused,
}

/// Alarm flags and pause countdown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmState {
    enabled: bool,
    paused: bool,
    /// Pause deadline (ms since boot); only meaningful while paused
    pause_until_ms: Option<u64>,
}

impl AlarmState {
    /// Alarm disabled, not paused
    pub const fn new() -> Self {
        Self {
            enabled: false,
            paused: false,
            pause_until_ms: None,
        }
    }

    /// Check if the alarm is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check if the pause flag is set
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause deadline, if paused
    pub fn pause_until_ms(&self) -> Option<u64> {
        if self.paused {
            self.pause_until_ms
        } else {
            None
        }
    }

    /// Check if a temperature warning should sound
    pub fn should_sound(&self) -> bool {
        self.enabled && !self.paused
    }

    /// Effective mode
    pub fn mode(&self) -> AlarmMode {
        match (self.enabled, self.paused) {
            (false, _) => AlarmMode::Disabled,
            (true, false) => AlarmMode::Enabled,
            (true, true) => AlarmMode::EnabledPaused,
        }
    }

    /// Flip the enabled flag
    ///
    /// Returns the new enabled state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Assert (or restart) a pause lasting `duration_ms` from `now_ms`
    ///
    /// Re-asserting while paused restarts the countdown; it does not stack.
    pub fn pause(&mut self, now_ms: u64, duration_ms: u32) {
        self.paused = true;
        self.pause_until_ms = Some(now_ms.saturating_add(duration_ms as u64));
    }

    /// Clear the pause once `now_ms` has passed the deadline
    ///
    /// Returns true exactly once per pause, on the call that clears it.
    pub fn check_recovery(&mut self, now_ms: u64) -> bool {
        match self.pause_until_ms {
            Some(until) if self.paused && now_ms > until => {
                self.paused = false;
                self.pause_until_ms = None;
                true
            }
            _ => false,
        }
    }
}
