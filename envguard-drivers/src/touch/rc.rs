//! RC charge-time capacitive touch pad
//!
//! The pad is a plain electrode on a GPIO with a large pull-up resistor.
//! A measurement discharges the pad, releases it, and counts microseconds
//! until the pin reads high. A finger adds capacitance and lengthens the
//! charge time.
//!
//! The reported intensity is `max_count - count`, so a touch *lowers* it
//! and the usual "below threshold = touched" rule applies.

use embedded_hal::delay::DelayNs;
use envguard_core::traits::{TouchChannelId, TouchError, TouchSensor};

/// Pin that can be switched between driving low and floating input
pub trait ChargePin {
    /// Drive the pad low to empty it
    fn discharge(&mut self);

    /// Float the pad so the pull-up charges it
    fn release(&mut self);

    /// Check if the pad has charged past the input high level
    fn is_charged(&mut self) -> bool;
}

/// Measurement settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RcTouchConfig {
    /// Discharge time before each measurement (µs)
    pub discharge_us: u32,
    /// Charge counts before giving up (µs)
    pub max_count: u16,
    /// Measurements averaged per read
    pub samples: u8,
}

impl Default for RcTouchConfig {
    fn default() -> Self {
        Self {
            discharge_us: 10,
            max_count: 1000,
            samples: 4,
        }
    }
}

/// One RC touch pad
pub struct RcTouchPad<P, D> {
    pin: P,
    delay: D,
    config: RcTouchConfig,
}

impl<P: ChargePin, D: DelayNs> RcTouchPad<P, D> {
    /// Create a pad; leaves it discharged
    pub fn new(mut pin: P, delay: D, config: RcTouchConfig) -> Self {
        pin.discharge();
        Self { pin, delay, config }
    }

    /// Measurement settings
    pub fn config(&self) -> &RcTouchConfig {
        &self.config
    }

    /// Charge time of one measurement (µs)
    fn charge_time(&mut self) -> Result<u16, TouchError> {
        self.pin.discharge();
        self.delay.delay_us(self.config.discharge_us);
        self.pin.release();

        let mut count = 0;
        while !self.pin.is_charged() {
            count += 1;
            if count >= self.config.max_count {
                self.pin.discharge();
                return Err(TouchError::Timeout);
            }
            self.delay.delay_us(1);
        }
        self.pin.discharge();
        Ok(count)
    }

    /// Averaged intensity; lower means touched
    pub fn measure(&mut self) -> Result<u16, TouchError> {
        let samples = self.config.samples.max(1);
        let mut total: u32 = 0;
        for _ in 0..samples {
            total += self.charge_time()? as u32;
        }
        let average = (total / samples as u32) as u16;
        Ok(self.config.max_count - average)
    }
}

/// The toggle and pause pads as one [`TouchSensor`]
pub struct TouchPads<P, D> {
    pub toggle: RcTouchPad<P, D>,
    pub pause: RcTouchPad<P, D>,
}

impl<P: ChargePin, D: DelayNs> TouchPads<P, D> {
    /// Pair two pads
    pub fn new(toggle: RcTouchPad<P, D>, pause: RcTouchPad<P, D>) -> Self {
        Self { toggle, pause }
    }
}

impl<P: ChargePin, D: DelayNs> TouchSensor for TouchPads<P, D> {
    fn read_touch(&mut self, channel: TouchChannelId) -> Result<u16, TouchError> {
        match channel {
            TouchChannelId::Toggle => self.toggle.measure(),
            TouchChannelId::Pause => self.pause.measure(),
        }
    }
}
