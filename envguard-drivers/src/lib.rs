//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in envguard-core on top of `embedded-hal` 1.0:
//!
//! - Indicator LEDs (three GPIOs)
//! - Buzzer (PWM channel)
//! - Temperature/humidity sensor (DHT11)
//! - Capacitive touch pads (RC charge timing)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buzzer;
pub mod indicator;
pub mod sensor;
pub mod touch;
