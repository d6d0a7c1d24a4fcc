//! Board pin adapters
//!
//! Glue between embassy-rp GPIO types and driver traits that
//! embedded-hal does not cover.

use embassy_rp::gpio::{Flex, Pull};
use envguard_drivers::touch::ChargePin;

/// Touch electrode on a flexible GPIO with an external pull-up
pub struct FlexChargePin {
    pin: Flex<'static>,
}

impl FlexChargePin {
    /// Wrap a pin; the internal pull is disabled so the external
    /// resistor sets the charge rate
    pub fn new(mut pin: Flex<'static>) -> Self {
        pin.set_pull(Pull::None);
        Self { pin }
    }
}

impl ChargePin for FlexChargePin {
    fn discharge(&mut self) {
        self.pin.set_low();
        self.pin.set_as_output();
    }

    fn release(&mut self) {
        self.pin.set_as_input();
    }

    fn is_charged(&mut self) -> bool {
        self.pin.is_high()
    }
}
