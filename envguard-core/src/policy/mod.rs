//! Environment warning policy
//!
//! Fuses a sensor reading with the alarm state into LED and buzzer
//! commands.

pub mod environment;

pub use environment::{BuzzerPattern, EnvironmentPolicy, OutputCommand, WarningLevel};
