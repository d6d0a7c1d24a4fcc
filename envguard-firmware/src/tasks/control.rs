//! Alarm control task
//!
//! Owns the control loop. Each iteration runs one tick, logs what
//! happened, then sleeps for the poll interval. Buzzer patterns block the
//! task while they play.

use defmt::*;
use embassy_rp::gpio::{Output, OutputOpenDrain};
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Delay, Instant, Timer};

use envguard_core::control::{ControlLoop, TickReport};
use envguard_core::state::ControlEvent;
use envguard_drivers::buzzer::PwmBuzzer;
use envguard_drivers::indicator::GpioIndicators;
use envguard_drivers::sensor::Dht11;
use envguard_drivers::touch::TouchPads;

use crate::pins::FlexChargePin;

/// The control loop wired to this board
pub type Controller = ControlLoop<
    TouchPads<FlexChargePin, Delay>,
    Dht11<OutputOpenDrain<'static>, Delay>,
    GpioIndicators<Output<'static>, Output<'static>, Output<'static>>,
    PwmBuzzer<PwmOutput<'static>>,
    Delay,
>;

/// Control task - runs the alarm loop forever
#[embassy_executor::task]
pub async fn control_task(mut controller: Controller) {
    info!("Control task started");

    loop {
        let now_ms = Instant::now().as_millis();
        let report = controller.tick(now_ms);
        log_report(&report);

        Timer::after_millis(controller.poll_interval_ms() as u64).await;
    }
}

/// Log every event of one iteration
fn log_report(report: &TickReport) {
    for event in &report.events {
        match *event {
            ControlEvent::AlarmEnabled => info!("Alarm enabled"),
            ControlEvent::AlarmDisabled => info!("Alarm disabled"),
            ControlEvent::PauseAsserted { until_ms } => {
                info!("Alarm paused until {}ms", until_ms)
            }
            ControlEvent::PauseExpired => info!("Pause expired"),
            ControlEvent::Reading {
                temperature_x10,
                humidity_x10,
            } => debug!(
                "Temperature: {}.{}°C, humidity: {}.{}%",
                temperature_x10 / 10,
                (temperature_x10 % 10).unsigned_abs(),
                humidity_x10 / 10,
                humidity_x10 % 10
            ),
            ControlEvent::SensorFailure(e) => warn!("Sensor read failed: {:?}", e),
            ControlEvent::TouchReadFailed { channel, error } => {
                warn!("Touch read failed on {:?}: {:?}", channel, error)
            }
            ControlEvent::WarningSuppressed => info!("Temperature warning silenced by pause"),
        }
    }

    if let Ok(command) = report.output {
        trace!("Outputs: {:?}, mode {:?}", command, report.mode);
    }
}
