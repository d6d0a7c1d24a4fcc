//! Control loop
//!
//! One iteration: poll touches, advance the pause timer, sample the
//! sensor, apply the policy, drive the outputs.

pub mod control_loop;

pub use control_loop::{ControlLoop, EventList, TickReport, MAX_EVENTS_PER_TICK};
