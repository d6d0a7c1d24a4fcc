//! Configuration type definitions

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Touch input settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TouchConfig {
    /// Intensity below which the toggle pad counts as touched
    pub toggle_threshold: u16,
    /// Intensity below which the pause pad counts as touched
    pub pause_threshold: u16,
    /// Minimum spacing between two recognized triggers (ms)
    pub debounce_ms: u32,
    /// Touches are ignored for this long after startup (ms)
    pub boot_block_ms: u32,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            toggle_threshold: 300,
            pause_threshold: 300,
            debounce_ms: 800,
            boot_block_ms: 2000,
        }
    }
}

/// Loop and pause timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TimingConfig {
    /// Length of one pause assertion (ms)
    pub pause_duration_ms: u32,
    /// Sleep between loop iterations (ms)
    pub poll_interval_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            pause_duration_ms: 15_000,
            poll_interval_ms: 2000,
        }
    }
}

/// Warning thresholds, 0.1 resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PolicyConfig {
    /// Readings strictly above this are a temperature warning (°C × 10)
    pub temperature_threshold_x10: i16,
    /// Readings strictly above this are a humidity warning (% × 10)
    pub humidity_threshold_x10: u16,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            temperature_threshold_x10: 300, // 30.0°C
            humidity_threshold_x10: 800,    // 80.0 %RH
        }
    }
}

/// When a warning pattern looks at the pause flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum PauseCheck {
    /// Once, before the first pulse; a paused alarm plays nothing
    #[default]
    AtEntry,
    /// Before every pulse; a pause mid-pattern cuts the rest
    PerPulse,
}

/// On/off pulse train
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PulsePattern {
    /// Number of pulses
    pub pulses: u8,
    /// Buzzer on-time per pulse (ms)
    pub on_ms: u32,
    /// Silence after each pulse (ms)
    pub off_ms: u32,
}

impl PulsePattern {
    /// Total playback time of the pattern (ms)
    pub const fn duration_ms(&self) -> u32 {
        self.pulses as u32 * (self.on_ms + self.off_ms)
    }
}

/// Buzzer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct BuzzerConfig {
    /// PWM duty while a pulse sounds (%)
    pub duty_percent: u8,
    /// Acknowledgment pattern
    pub single_beep: PulsePattern,
    /// Alarm pattern
    pub warning_beep: PulsePattern,
    /// How the warning pattern honors a pause
    pub pause_check: PauseCheck,
}

impl Default for BuzzerConfig {
    fn default() -> Self {
        Self {
            duty_percent: 78, // ~800/1023
            single_beep: PulsePattern {
                pulses: 1,
                on_ms: 200,
                off_ms: 100,
            },
            warning_beep: PulsePattern {
                pulses: 3,
                on_ms: 150,
                off_ms: 100,
            },
            pause_check: PauseCheck::AtEntry,
        }
    }
}

/// Complete alarm configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct AlarmConfig {
    pub touch: TouchConfig,
    pub timing: TimingConfig,
    pub policy: PolicyConfig,
    pub buzzer: BuzzerConfig,
}

/// Reasons a configuration is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A touch threshold of zero can never trigger
    ZeroTouchThreshold,
    /// Debounce window must be non-zero
    ZeroDebounce,
    /// Pause duration must be non-zero
    ZeroPauseDuration,
    /// Poll interval must be non-zero
    ZeroPollInterval,
    /// Duty cycle above 100%
    DutyOutOfRange(u8),
    /// A pattern with no pulses or no on-time
    EmptyPattern,
    /// Humidity threshold above 100.0 %RH
    HumidityOutOfRange(u16),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroTouchThreshold => f.write_str("touch threshold must be above 0"),
            ConfigError::ZeroDebounce => f.write_str("debounce window must be above 0 ms"),
            ConfigError::ZeroPauseDuration => f.write_str("pause duration must be above 0 ms"),
            ConfigError::ZeroPollInterval => f.write_str("poll interval must be above 0 ms"),
            ConfigError::DutyOutOfRange(d) => write!(f, "buzzer duty {}% exceeds 100%", d),
            ConfigError::EmptyPattern => f.write_str("beep pattern needs pulses and on-time"),
            ConfigError::HumidityOutOfRange(h) => {
                write!(f, "humidity threshold {}.{}% exceeds 100%", h / 10, h % 10)
            }
        }
    }
}

impl AlarmConfig {
    /// Check the configuration for values the controller cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.touch.toggle_threshold == 0 || self.touch.pause_threshold == 0 {
            return Err(ConfigError::ZeroTouchThreshold);
        }
        if self.touch.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        if self.timing.pause_duration_ms == 0 {
            return Err(ConfigError::ZeroPauseDuration);
        }
        if self.timing.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.buzzer.duty_percent > 100 {
            return Err(ConfigError::DutyOutOfRange(self.buzzer.duty_percent));
        }
        for pattern in [self.buzzer.single_beep, self.buzzer.warning_beep] {
            if pattern.pulses == 0 || pattern.on_ms == 0 {
                return Err(ConfigError::EmptyPattern);
            }
        }
        if self.policy.humidity_threshold_x10 > 1000 {
            return Err(ConfigError::HumidityOutOfRange(
                self.policy.humidity_threshold_x10,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_device() {
        let config = AlarmConfig::default();
        assert_eq!(config.touch.debounce_ms, 800);
        assert_eq!(config.touch.boot_block_ms, 2000);
        assert_eq!(config.timing.pause_duration_ms, 15_000);
        assert_eq!(config.timing.poll_interval_ms, 2000);
        assert_eq!(config.policy.temperature_threshold_x10, 300);
        assert_eq!(config.policy.humidity_threshold_x10, 800);
        assert_eq!(config.buzzer.pause_check, PauseCheck::AtEntry);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pattern_duration() {
        let config = BuzzerConfig::default();
        assert_eq!(config.single_beep.duration_ms(), 300);
        assert_eq!(config.warning_beep.duration_ms(), 750);
    }

    #[test]
    fn test_rejects_zero_timings() {
        let mut config = AlarmConfig::default();
        config.touch.debounce_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDebounce));

        let mut config = AlarmConfig::default();
        config.timing.poll_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollInterval));

        let mut config = AlarmConfig::default();
        config.timing.pause_duration_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroPauseDuration));
    }

    #[test]
    fn test_rejects_bad_buzzer() {
        let mut config = AlarmConfig::default();
        config.buzzer.duty_percent = 101;
        assert_eq!(config.validate(), Err(ConfigError::DutyOutOfRange(101)));

        let mut config = AlarmConfig::default();
        config.buzzer.warning_beep.pulses = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyPattern));
    }

    #[test]
    fn test_rejects_impossible_humidity() {
        let mut config = AlarmConfig::default();
        config.policy.humidity_threshold_x10 = 1001;
        assert_eq!(
            config.validate(),
            Err(ConfigError::HumidityOutOfRange(1001))
        );
    }
}
