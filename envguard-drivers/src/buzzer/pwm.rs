//! PWM buzzer
//!
//! Piezo or magnetic buzzer on a PWM channel. The PWM frequency sets the
//! tone and is configured by the board; this driver only switches duty.

use embedded_hal::pwm::SetDutyCycle;
use envguard_core::traits::BuzzerOutput;

/// Buzzer on a PWM channel
pub struct PwmBuzzer<P> {
    pwm: P,
    /// Duty last requested (%)
    duty_percent: u8,
    /// A duty write has failed since creation
    faulted: bool,
}

impl<P: SetDutyCycle> PwmBuzzer<P> {
    /// Create a buzzer; starts silent
    pub fn new(pwm: P) -> Self {
        let mut buzzer = Self {
            pwm,
            duty_percent: 0,
            faulted: false,
        };
        buzzer.silence();
        buzzer
    }

    /// Duty last requested (%)
    pub fn duty_percent(&self) -> u8 {
        self.duty_percent
    }

    /// Check if the buzzer is sounding
    pub fn is_sounding(&self) -> bool {
        self.duty_percent > 0
    }

    /// Check if any duty write has failed
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }
}

impl<P: SetDutyCycle> BuzzerOutput for PwmBuzzer<P> {
    fn set_duty(&mut self, duty_percent: u8) {
        let duty_percent = duty_percent.min(100);
        if self.pwm.set_duty_cycle_percent(duty_percent).is_err() {
            self.faulted = true;
        }
        self.duty_percent = duty_percent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;

    /// Mock PWM channel with a 10-bit counter
    struct MockPwm {
        duty: u16,
    }

    impl ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            1023
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_starts_silent() {
        let buzzer = PwmBuzzer::new(MockPwm { duty: 512 });
        assert!(!buzzer.is_sounding());
        assert_eq!(buzzer.pwm.duty, 0);
    }

    #[test]
    fn test_duty_scaling() {
        let mut buzzer = PwmBuzzer::new(MockPwm { duty: 0 });
        buzzer.set_duty(78);
        assert!(buzzer.is_sounding());
        // 78% of 1023, as scaled by embedded-hal
        assert_eq!(buzzer.pwm.duty, 797);

        buzzer.silence();
        assert_eq!(buzzer.pwm.duty, 0);
        assert!(!buzzer.is_faulted());
    }

    #[test]
    fn test_duty_clamped() {
        let mut buzzer = PwmBuzzer::new(MockPwm { duty: 0 });
        buzzer.set_duty(250);
        assert_eq!(buzzer.duty_percent(), 100);
        assert_eq!(buzzer.pwm.duty, 1023);
    }
}
