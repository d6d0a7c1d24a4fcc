//! Events reported by one control loop iteration

use crate::traits::{SensorError, TouchChannelId, TouchError};

/// Something observable that happened during a loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlEvent {
    // Alarm transitions
    /// Toggle pad switched the alarm on
    AlarmEnabled,
    /// Toggle pad switched the alarm off
    AlarmDisabled,
    /// Pause pad asserted or restarted a pause ending at the given time
    PauseAsserted { until_ms: u64 },
    /// Pause countdown ran out
    PauseExpired,

    // Sensor
    /// Successful sample (°C × 10, % × 10)
    Reading {
        temperature_x10: i16,
        humidity_x10: u16,
    },
    /// Sample failed; outputs left as they were
    SensorFailure(SensorError),

    // Input faults
    /// Touch read failed; treated as no touch
    TouchReadFailed {
        channel: TouchChannelId,
        error: TouchError,
    },

    // Buzzer
    /// Warning pattern requested but cut by the pause
    WarningSuppressed,
}

impl ControlEvent {
    /// Check if this event changed the alarm state
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            ControlEvent::AlarmEnabled
                | ControlEvent::AlarmDisabled
                | ControlEvent::PauseAsserted { .. }
                | ControlEvent::PauseExpired
        )
    }

    /// Check if this event reports a fault
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            ControlEvent::SensorFailure(_) | ControlEvent::TouchReadFailed { .. }
        )
    }
}
