//! Reading classification and output commands

use crate::config::PolicyConfig;
use crate::state::AlarmState;
use crate::traits::{Environment, LedState, SensorError};

/// Named buzzer patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuzzerPattern {
    /// Acknowledgment beep
    SingleBeep,
    /// Triple alarm beep
    WarningBeep,
}

/// Classification of one reading, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WarningLevel {
    /// Temperature above its threshold
    Overheat,
    /// Humidity above its threshold (temperature fine)
    Humid,
    /// Both fine
    Normal,
}

impl WarningLevel {
    /// LED pattern for this level; exactly one LED lit
    pub fn leds(&self) -> LedState {
        match self {
            WarningLevel::Overheat => LedState::RED,
            WarningLevel::Humid => LedState::YELLOW,
            WarningLevel::Normal => LedState::GREEN,
        }
    }
}

/// Outputs for one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputCommand {
    pub level: WarningLevel,
    pub leds: LedState,
    pub buzzer: Option<BuzzerPattern>,
}

/// Maps readings and alarm state to outputs
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EnvironmentPolicy {
    config: PolicyConfig,
}

impl EnvironmentPolicy {
    /// Create a policy with the given thresholds
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Thresholds in use
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Classify a reading; first match wins
    pub fn classify(&self, reading: &Environment) -> WarningLevel {
        if reading.temperature_x10 > self.config.temperature_threshold_x10 {
            WarningLevel::Overheat
        } else if reading.humidity_x10 > self.config.humidity_threshold_x10 {
            WarningLevel::Humid
        } else {
            WarningLevel::Normal
        }
    }

    /// Compute the outputs for one iteration
    ///
    /// A failed reading passes through as the error: the caller must leave
    /// the previous outputs standing and must not sound the buzzer.
    pub fn evaluate(
        &self,
        reading: Result<Environment, SensorError>,
        alarm: &AlarmState,
    ) -> Result<OutputCommand, SensorError> {
        let reading = reading?;
        let level = self.classify(&reading);

        // Only temperature ever sounds the buzzer
        let buzzer = match level {
            WarningLevel::Overheat if alarm.should_sound() => Some(BuzzerPattern::WarningBeep),
            _ => None,
        };

        Ok(OutputCommand {
            level,
            leds: level.leds(),
            buzzer,
        })
    }
}

impl Default for EnvironmentPolicy {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}
