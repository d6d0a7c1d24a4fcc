//! envguard - Environment Alarm Firmware
//!
//! Main firmware binary for RP2040-based boards. Polls a DHT11, shows the
//! result on three LEDs, and sounds a buzzer on over-temperature while the
//! alarm is armed. Two touch pads toggle the alarm and pause it.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Flex, Level, Output, OutputOpenDrain};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::{Delay, Instant};
use {defmt_rtt as _, panic_probe as _};

use envguard_core::control::ControlLoop;
use envguard_drivers::buzzer::PwmBuzzer;
use envguard_drivers::indicator::GpioIndicators;
use envguard_drivers::sensor::Dht11;
use envguard_drivers::touch::{RcTouchConfig, RcTouchPad, TouchPads};

use crate::config::ALARM_CONFIG;
use crate::pins::FlexChargePin;

mod config;
mod pins;
mod tasks;

/// System clock feeding the PWM slices (Hz)
const SYS_CLOCK_HZ: u32 = 125_000_000;

/// Buzzer tone (Hz)
const BUZZER_FREQ_HZ: u32 = 2000;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("envguard firmware starting...");

    let p = embassy_rp::init(Default::default());
    let started_at_ms = Instant::now().as_millis();
    info!("Peripherals initialized");
    info!("Config: {:?}", ALARM_CONFIG);

    // Status LEDs (red GP19, yellow GP21, green GP22)
    let leds = GpioIndicators::new_active_high(
        Output::new(p.PIN_19, Level::Low),
        Output::new(p.PIN_21, Level::Low),
        Output::new(p.PIN_22, Level::Low),
    );

    // Buzzer on GP15 (PWM slice 7, channel B)
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = (SYS_CLOCK_HZ / BUZZER_FREQ_HZ - 1) as u16;
    pwm_config.compare_b = 0;
    let (_, buzzer_out) = Pwm::new_output_b(p.PWM_SLICE7, p.PIN_15, pwm_config).split();
    let Some(buzzer_out) = buzzer_out else {
        error!("Buzzer PWM channel unavailable");
        return;
    };
    let buzzer = PwmBuzzer::new(buzzer_out);

    // DHT11 on GP4 (open-drain, external pull-up)
    let sensor = Dht11::new(OutputOpenDrain::new(p.PIN_4, Level::High), Delay);

    // Touch pads (toggle GP13, pause GP14), each with a 1M pull-up
    let touch_config = RcTouchConfig::default();
    let touch = TouchPads::new(
        RcTouchPad::new(FlexChargePin::new(Flex::new(p.PIN_13)), Delay, touch_config),
        RcTouchPad::new(FlexChargePin::new(Flex::new(p.PIN_14)), Delay, touch_config),
    );

    info!("Board initialized");

    let controller = ControlLoop::new(
        ALARM_CONFIG,
        started_at_ms,
        touch,
        sensor,
        leds,
        buzzer,
        Delay,
    );

    spawner.spawn(tasks::control_task(controller)).unwrap();

    info!("Control task spawned, firmware running");

    // Main task has nothing else to do - all work happens in the control task
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
