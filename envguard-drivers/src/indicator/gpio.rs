//! GPIO indicator LEDs
//!
//! Red/yellow/green LEDs on three GPIO pins, directly or via transistors.

use embedded_hal::digital::OutputPin;
use envguard_core::traits::{IndicatorLeds, LedState};

/// Three indicator LEDs
///
/// The pins can be active-high (default) or active-low. A pin that fails
/// to switch marks the driver faulted; the remaining pins are still written.
pub struct GpioIndicators<R, Y, G> {
    red: R,
    yellow: Y,
    green: G,
    /// If true, LED on = pin LOW
    inverted: bool,
    /// Current logical state
    state: LedState,
    /// A pin write has failed since creation
    faulted: bool,
}

impl<R: OutputPin, Y: OutputPin, G: OutputPin> GpioIndicators<R, Y, G> {
    /// Create the LED driver, all LEDs off
    ///
    /// # Arguments
    /// - `inverted`: If true, an LED is lit when its pin is LOW
    pub fn new(red: R, yellow: Y, green: G, inverted: bool) -> Self {
        let mut leds = Self {
            red,
            yellow,
            green,
            inverted,
            state: LedState::OFF,
            faulted: false,
        };
        leds.set_leds(false, false, false);
        leds
    }

    /// Create with active-high pins
    pub fn new_active_high(red: R, yellow: Y, green: G) -> Self {
        Self::new(red, yellow, green, false)
    }

    /// Create with active-low pins
    pub fn new_active_low(red: R, yellow: Y, green: G) -> Self {
        Self::new(red, yellow, green, true)
    }

    /// Logical state last written
    pub fn state(&self) -> LedState {
        self.state
    }

    /// Check if any pin write has failed
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }
}

/// Drive one pin; true on success
fn drive<P: OutputPin>(pin: &mut P, on: bool, inverted: bool) -> bool {
    // on=true, inverted=false → high; on=true, inverted=true → low
    let result = if on != inverted {
        pin.set_high()
    } else {
        pin.set_low()
    };
    result.is_ok()
}

impl<R: OutputPin, Y: OutputPin, G: OutputPin> IndicatorLeds for GpioIndicators<R, Y, G> {
    fn set_leds(&mut self, red: bool, yellow: bool, green: bool) {
        let ok = [
            drive(&mut self.red, red, self.inverted),
            drive(&mut self.yellow, yellow, self.inverted),
            drive(&mut self.green, green, self.inverted),
        ];
        if ok.contains(&false) {
            self.faulted = true;
        }
        self.state = LedState { red, yellow, green };
    }
}
