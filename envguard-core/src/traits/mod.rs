//! Hardware abstraction traits
//!
//! These traits define the interface between the alarm logic
//! and hardware-specific implementations.

pub mod environment;
pub mod output;
pub mod touch;

pub use environment::{Environment, EnvironmentSensor, SensorError};
pub use output::{BuzzerOutput, IndicatorLeds, LedState};
pub use touch::{TouchChannelId, TouchError, TouchSensor};
