//! Blocking pulse sequencer
//!
//! Playback holds the caller for the whole pattern; the control loop does
//! not poll touches or the sensor meanwhile.

use embedded_hal::delay::DelayNs;

use crate::config::{BuzzerConfig, PauseCheck, PulsePattern};
use crate::policy::BuzzerPattern;
use crate::traits::BuzzerOutput;

/// Turns named patterns into timed on/off pulses
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BuzzerSequencer {
    config: BuzzerConfig,
}

impl BuzzerSequencer {
    /// Create a sequencer
    pub fn new(config: BuzzerConfig) -> Self {
        Self { config }
    }

    /// Timing of a named pattern
    pub fn pattern(&self, pattern: BuzzerPattern) -> PulsePattern {
        match pattern {
            BuzzerPattern::SingleBeep => self.config.single_beep,
            BuzzerPattern::WarningBeep => self.config.warning_beep,
        }
    }

    /// Play a pattern to completion
    ///
    /// `is_paused` is consulted for the warning pattern only: once before
    /// the first pulse, or before every pulse with [`PauseCheck::PerPulse`].
    /// Acknowledgment beeps always play.
    ///
    /// Returns the number of pulses actually played.
    pub fn play<B, D, F>(
        &self,
        pattern: BuzzerPattern,
        buzzer: &mut B,
        delay: &mut D,
        mut is_paused: F,
    ) -> u8
    where
        B: BuzzerOutput,
        D: DelayNs,
        F: FnMut() -> bool,
    {
        let timing = self.pattern(pattern);
        let interruptible = pattern == BuzzerPattern::WarningBeep;

        if interruptible && is_paused() {
            return 0;
        }

        let mut played = 0;
        for pulse in 0..timing.pulses {
            if interruptible
                && pulse > 0
                && self.config.pause_check == PauseCheck::PerPulse
                && is_paused()
            {
                break;
            }
            self.pulse(&timing, buzzer, delay);
            played += 1;
        }
        played
    }

    /// One on/off pulse
    fn pulse<B: BuzzerOutput, D: DelayNs>(
        &self,
        timing: &PulsePattern,
        buzzer: &mut B,
        delay: &mut D,
    ) {
        buzzer.set_duty(self.config.duty_percent);
        delay.delay_ms(timing.on_ms);
        buzzer.silence();
        delay.delay_ms(timing.off_ms);
    }
}

impl Default for BuzzerSequencer {
    fn default() -> Self {
        Self::new(BuzzerConfig::default())
    }
}
