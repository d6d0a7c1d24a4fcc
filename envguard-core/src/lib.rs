//! Board-agnostic core logic for the envguard environment alarm
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (touch, environment sensor, LEDs, buzzer)
//! - Debounced touch channels with a boot block
//! - Alarm enable/pause state machine
//! - Environment warning policy
//! - Buzzer pulse sequencing
//! - The control loop tying them together
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buzzer;
pub mod config;
pub mod control;
pub mod input;
pub mod policy;
pub mod state;
pub mod traits;
