//! Capacitive touch implementations

pub mod rc;

pub use rc::{ChargePin, RcTouchConfig, RcTouchPad, TouchPads};
