//! Output traits: status LEDs and buzzer

/// Logical state of the three status LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedState {
    pub red: bool,
    pub yellow: bool,
    pub green: bool,
}

impl LedState {
    /// All LEDs off
    pub const OFF: Self = Self {
        red: false,
        yellow: false,
        green: false,
    };
    /// Only red
    pub const RED: Self = Self {
        red: true,
        yellow: false,
        green: false,
    };
    /// Only yellow
    pub const YELLOW: Self = Self {
        red: false,
        yellow: true,
        green: false,
    };
    /// Only green
    pub const GREEN: Self = Self {
        red: false,
        yellow: false,
        green: true,
    };
}

/// Trait for the red/yellow/green indicator LEDs
pub trait IndicatorLeds {
    /// Write all three LEDs at once
    fn set_leds(&mut self, red: bool, yellow: bool, green: bool);

    /// Write a [`LedState`]
    fn apply(&mut self, state: LedState) {
        self.set_leds(state.red, state.yellow, state.green);
    }
}

/// Trait for the buzzer output
///
/// Implementations drive a PWM channel or a plain GPIO.
pub trait BuzzerOutput {
    /// Set the drive duty cycle in percent (0 = silent)
    fn set_duty(&mut self, duty_percent: u8);

    /// Silence the buzzer
    fn silence(&mut self) {
        self.set_duty(0);
    }
}
