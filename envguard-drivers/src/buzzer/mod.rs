//! Buzzer implementations

pub mod pwm;

pub use pwm::PwmBuzzer;
