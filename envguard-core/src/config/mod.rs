//! Configuration types
//!
//! Board-agnostic alarm settings. The firmware bakes them in at build time.

pub mod types;

pub use types::*;
