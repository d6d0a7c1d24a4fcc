//! Indicator LED implementations

pub mod gpio;

pub use gpio::GpioIndicators;
