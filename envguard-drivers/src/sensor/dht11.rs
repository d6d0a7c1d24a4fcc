//! DHT11 temperature/humidity sensor
//!
//! Single-wire protocol on an open-drain pin with pull-up:
//!
//! ```text
//! host:   ‾‾‾|______18ms______|‾‾ release
//! sensor:                         |_80us_|‾80us‾| then 40 bits
//! bit:    |_50us_|‾26us‾|  = 0     |_50us_|‾70us‾|  = 1
//! ```
//!
//! Frame: humidity int, humidity dec, temperature int, temperature dec,
//! checksum (low byte of the sum of the first four). Bit 7 of the
//! temperature decimal byte marks a negative temperature.
//!
//! The sensor needs about 1s between samples. Callers poll no faster than
//! that; the control loop's cadence is well above it.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use envguard_core::traits::{Environment, EnvironmentSensor, SensorError};

/// Host start pulse (ms)
const START_LOW_MS: u32 = 18;
/// Wait for any response edge (µs)
const RESPONSE_TIMEOUT_US: u32 = 100;
/// Wait for any bit edge (µs)
const BIT_TIMEOUT_US: u32 = 100;
/// High pulses longer than this are a 1 bit (µs)
const ONE_THRESHOLD_US: u32 = 40;
/// Frame length
const FRAME_BITS: usize = 40;

/// Highest plausible humidity (% × 10)
const MAX_HUMIDITY_X10: u16 = 1000;
/// Highest plausible temperature (°C × 10)
const MAX_TEMPERATURE_X10: i16 = 800;

/// Decode a raw 5-byte frame
pub fn decode_frame(frame: [u8; 5]) -> Result<Environment, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch);
    }

    let humidity_x10 = frame[0] as u16 * 10 + frame[1].min(9) as u16;

    let magnitude = frame[2] as i16 * 10 + (frame[3] & 0x7F).min(9) as i16;
    let temperature_x10 = if frame[3] & 0x80 != 0 {
        -magnitude
    } else {
        magnitude
    };

    if humidity_x10 > MAX_HUMIDITY_X10 || temperature_x10 > MAX_TEMPERATURE_X10 {
        return Err(SensorError::OutOfRange);
    }

    Ok(Environment {
        temperature_x10,
        humidity_x10,
    })
}

/// DHT11 on a bidirectional open-drain pin
pub struct Dht11<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Create the driver and release the bus
    pub fn new(mut pin: P, delay: D) -> Self {
        let _ = pin.set_high();
        Self { pin, delay }
    }

    /// Release the pin and delay
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    /// Run one transaction and return the raw frame
    pub fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        let result = self.transfer();
        // Leave the bus idle whatever happened
        let _ = self.pin.set_high();
        result
    }

    fn transfer(&mut self) -> Result<[u8; 5], SensorError> {
        // Start signal
        self.pin.set_low().map_err(|_| SensorError::PinFault)?;
        self.delay.delay_ms(START_LOW_MS);
        self.pin.set_high().map_err(|_| SensorError::PinFault)?;

        // Response: pull-up high, sensor low 80us, sensor high 80us
        self.wait_for(false, RESPONSE_TIMEOUT_US)?;
        self.wait_for(true, RESPONSE_TIMEOUT_US)?;
        self.wait_for(false, RESPONSE_TIMEOUT_US)?;

        let mut frame = [0u8; 5];
        for bit in 0..FRAME_BITS {
            self.wait_for(true, BIT_TIMEOUT_US)?;
            let high_us = self.wait_for(false, BIT_TIMEOUT_US)?;
            if high_us > ONE_THRESHOLD_US {
                frame[bit / 8] |= 1 << (7 - bit % 8);
            }
        }
        Ok(frame)
    }

    /// Poll until the line reaches `high`; returns the wait in µs
    fn wait_for(&mut self, high: bool, timeout_us: u32) -> Result<u32, SensorError> {
        for elapsed in 0..timeout_us {
            let level = self.pin.is_high().map_err(|_| SensorError::PinFault)?;
            if level == high {
                return Ok(elapsed);
            }
            self.delay.delay_us(1);
        }
        Err(SensorError::Timeout)
    }
}

impl<P, D> EnvironmentSensor for Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn read_environment(&mut self) -> Result<Environment, SensorError> {
        decode_frame(self.read_frame()?)
    }
}
