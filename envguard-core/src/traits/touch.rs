//! Capacitive touch input trait

use core::fmt;

/// The two touch inputs of the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchChannelId {
    /// Flips the alarm between enabled and disabled
    Toggle,
    /// Silences the audible warning for a while
    Pause,
}

/// Errors from a touch read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// The sense pin could not be driven or read
    PinFault,
    /// Measurement did not settle
    Timeout,
}

impl fmt::Display for TouchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TouchError::PinFault => f.write_str("touch pin fault"),
            TouchError::Timeout => f.write_str("touch measurement timed out"),
        }
    }
}

/// Source of raw touch intensities
///
/// Lower intensity means a stronger touch.
pub trait TouchSensor {
    /// Read the raw intensity of one channel
    fn read_touch(&mut self, channel: TouchChannelId) -> Result<u16, TouchError>;
}
