//! Touch input handling
//!
//! Threshold comparison, debounce and boot block for one touch pad.

pub mod touch;

pub use touch::TouchChannel;
