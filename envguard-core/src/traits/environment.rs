//! Temperature/humidity sensor trait

use core::fmt;

/// Errors that can occur while sampling the environment sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not answer within its protocol timeout
    Timeout,
    /// Frame received but the checksum did not match
    ChecksumMismatch,
    /// The data pin could not be driven or read
    PinFault,
    /// Decoded values are outside the sensor's physical range
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::Timeout => f.write_str("sensor timed out"),
            SensorError::ChecksumMismatch => f.write_str("sensor checksum mismatch"),
            SensorError::PinFault => f.write_str("sensor pin fault"),
            SensorError::OutOfRange => f.write_str("sensor reading out of range"),
        }
    }
}

/// One successful environment sample
///
/// Values are fixed-point with 0.1 resolution: 30.5°C is 305,
/// 80.0 %RH is 800.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Environment {
    /// Temperature (°C × 10)
    pub temperature_x10: i16,
    /// Relative humidity (% × 10)
    pub humidity_x10: u16,
}

impl Environment {
    /// Build a reading from whole degrees and whole percent
    pub const fn from_whole(temperature_c: i16, humidity_pct: u16) -> Self {
        Self {
            temperature_x10: temperature_c * 10,
            humidity_x10: humidity_pct * 10,
        }
    }
}

/// Trait for combined temperature/humidity sensors
///
/// Takes `&mut self` because a sample usually drives a bus or pin.
pub trait EnvironmentSensor {
    /// Take one sample
    fn read_environment(&mut self) -> Result<Environment, SensorError>;
}
