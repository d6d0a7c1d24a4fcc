//! Alarm state machine
//!
//! Enable/pause flags, their timers, and the events a loop iteration
//! reports.

pub mod alarm;
pub mod events;

pub use alarm::{AlarmMode, AlarmState};
pub use events::ControlEvent;
