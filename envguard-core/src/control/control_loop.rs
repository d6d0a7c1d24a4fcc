//! Alarm control loop
//!
//! Owns the touch channels, alarm state, policy, sequencer and the
//! hardware collaborators. Single-threaded: a buzzer pattern blocks the
//! iteration until it finishes, so timers may drift by one pattern plus
//! one poll interval.

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::buzzer::BuzzerSequencer;
use crate::config::AlarmConfig;
use crate::input::TouchChannel;
use crate::policy::{BuzzerPattern, EnvironmentPolicy, OutputCommand, WarningLevel};
use crate::state::{AlarmMode, AlarmState, ControlEvent};
use crate::traits::{
    BuzzerOutput, EnvironmentSensor, IndicatorLeds, LedState, SensorError, TouchChannelId,
    TouchSensor,
};

/// Upper bound on events one iteration can produce
pub const MAX_EVENTS_PER_TICK: usize = 8;

/// Events of one iteration, in the order they happened
pub type EventList = Vec<ControlEvent, MAX_EVENTS_PER_TICK>;

/// Outcome of one iteration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// What happened
    pub events: EventList,
    /// Applied outputs, or the sensor error that left them standing
    pub output: Result<OutputCommand, SensorError>,
    /// Alarm mode at the end of the iteration
    pub mode: AlarmMode,
}

/// The alarm controller
pub struct ControlLoop<T, S, L, B, D> {
    config: AlarmConfig,
    toggle: TouchChannel,
    pause: TouchChannel,
    alarm: AlarmState,
    policy: EnvironmentPolicy,
    sequencer: BuzzerSequencer,
    touch: T,
    sensor: S,
    leds: L,
    buzzer: B,
    delay: D,
    /// Last LED state written
    led_state: LedState,
}

impl<T, S, L, B, D> ControlLoop<T, S, L, B, D>
where
    T: TouchSensor,
    S: EnvironmentSensor,
    L: IndicatorLeds,
    B: BuzzerOutput,
    D: DelayNs,
{
    /// Create the controller
    ///
    /// `started_at_ms` anchors the touch boot block. Outputs start off.
    pub fn new(
        config: AlarmConfig,
        started_at_ms: u64,
        touch: T,
        sensor: S,
        mut leds: L,
        mut buzzer: B,
        delay: D,
    ) -> Self {
        leds.apply(LedState::OFF);
        buzzer.silence();

        let touch_cfg = &config.touch;
        Self {
            toggle: TouchChannel::new(
                TouchChannelId::Toggle,
                touch_cfg.toggle_threshold,
                touch_cfg.debounce_ms,
                started_at_ms,
                touch_cfg.boot_block_ms,
            ),
            pause: TouchChannel::new(
                TouchChannelId::Pause,
                touch_cfg.pause_threshold,
                touch_cfg.debounce_ms,
                started_at_ms,
                touch_cfg.boot_block_ms,
            ),
            alarm: AlarmState::new(),
            policy: EnvironmentPolicy::new(config.policy),
            sequencer: BuzzerSequencer::new(config.buzzer),
            config,
            touch,
            sensor,
            leds,
            buzzer,
            delay,
            led_state: LedState::OFF,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &AlarmConfig {
        &self.config
    }

    /// Current alarm state
    pub fn alarm(&self) -> &AlarmState {
        &self.alarm
    }

    /// LED state currently shown
    pub fn leds(&self) -> LedState {
        self.led_state
    }

    /// Sleep between iterations
    pub fn poll_interval_ms(&self) -> u32 {
        self.config.timing.poll_interval_ms
    }

    /// Run one iteration without the trailing sleep
    pub fn tick(&mut self, now_ms: u64) -> TickReport {
        let mut events = EventList::new();

        self.poll_toggle(now_ms, &mut events);
        self.poll_pause(now_ms, &mut events);

        if self.alarm.check_recovery(now_ms) {
            push(&mut events, ControlEvent::PauseExpired);
            // Expiry while disabled is not a transition anyone hears
            if self.alarm.is_enabled() {
                self.beep(BuzzerPattern::SingleBeep);
            }
        }

        let reading = self.sensor.read_environment();
        match reading {
            Ok(env) => push(
                &mut events,
                ControlEvent::Reading {
                    temperature_x10: env.temperature_x10,
                    humidity_x10: env.humidity_x10,
                },
            ),
            Err(e) => push(&mut events, ControlEvent::SensorFailure(e)),
        }

        let output = self.policy.evaluate(reading, &self.alarm);
        if let Ok(command) = output {
            self.apply(&command, &mut events);
        }

        TickReport {
            events,
            output,
            mode: self.alarm.mode(),
        }
    }

    /// Run forever, sleeping through the delay between iterations
    ///
    /// `clock` returns milliseconds since boot; `on_tick` sees every report.
    pub fn run<C, F>(&mut self, mut clock: C, mut on_tick: F) -> !
    where
        C: FnMut() -> u64,
        F: FnMut(&TickReport),
    {
        loop {
            let report = self.tick(clock());
            on_tick(&report);
            self.delay.delay_ms(self.config.timing.poll_interval_ms);
        }
    }

    /// Toggle pad: flip the alarm and acknowledge
    fn poll_toggle(&mut self, now_ms: u64, events: &mut EventList) {
        match self.touch.read_touch(TouchChannelId::Toggle) {
            Ok(intensity) => {
                if self.toggle.poll(now_ms, intensity) {
                    let event = if self.alarm.toggle() {
                        ControlEvent::AlarmEnabled
                    } else {
                        ControlEvent::AlarmDisabled
                    };
                    push(events, event);
                    self.beep(BuzzerPattern::SingleBeep);
                }
            }
            Err(error) => push(
                events,
                ControlEvent::TouchReadFailed {
                    channel: TouchChannelId::Toggle,
                    error,
                },
            ),
        }
    }

    /// Pause pad: start or restart the countdown
    fn poll_pause(&mut self, now_ms: u64, events: &mut EventList) {
        match self.touch.read_touch(TouchChannelId::Pause) {
            Ok(intensity) => {
                if self.pause.poll(now_ms, intensity) {
                    self.alarm.pause(now_ms, self.config.timing.pause_duration_ms);
                    let until_ms = self.alarm.pause_until_ms().unwrap_or(now_ms);
                    push(events, ControlEvent::PauseAsserted { until_ms });
                }
            }
            Err(error) => push(
                events,
                ControlEvent::TouchReadFailed {
                    channel: TouchChannelId::Pause,
                    error,
                },
            ),
        }
    }

    /// Write LEDs, then play any pattern to completion
    fn apply(&mut self, command: &OutputCommand, events: &mut EventList) {
        self.leds.apply(command.leds);
        self.led_state = command.leds;

        match command.buzzer {
            Some(pattern) => {
                let wanted = self.sequencer.pattern(pattern).pulses;
                if self.beep(pattern) < wanted {
                    push(events, ControlEvent::WarningSuppressed);
                }
            }
            None => {
                if command.level == WarningLevel::Overheat
                    && self.alarm.mode() == AlarmMode::EnabledPaused
                {
                    push(events, ControlEvent::WarningSuppressed);
                }
            }
        }
    }

    /// Play a pattern; returns pulses played
    fn beep(&mut self, pattern: BuzzerPattern) -> u8 {
        let alarm = &self.alarm;
        self.sequencer
            .play(pattern, &mut self.buzzer, &mut self.delay, || alarm.is_paused())
    }
}

/// Record an event; the list is sized for the worst case
fn push(events: &mut EventList, event: ControlEvent) {
    let _ = events.push(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PauseCheck;
    use crate::traits::{Environment, TouchError};

    const UNTOUCHED: u16 = 1000;
    const TOUCHED: u16 = 100;

    struct MockTouch {
        toggle: Result<u16, TouchError>,
        pause: Result<u16, TouchError>,
    }

    impl TouchSensor for MockTouch {
        fn read_touch(&mut self, channel: TouchChannelId) -> Result<u16, TouchError> {
            match channel {
                TouchChannelId::Toggle => self.toggle,
                TouchChannelId::Pause => self.pause,
            }
        }
    }

    struct MockSensor {
        next: Result<Environment, SensorError>,
    }

    impl EnvironmentSensor for MockSensor {
        fn read_environment(&mut self) -> Result<Environment, SensorError> {
            self.next
        }
    }

    struct MockLeds {
        writes: std::vec::Vec<LedState>,
    }

    impl IndicatorLeds for MockLeds {
        fn set_leds(&mut self, red: bool, yellow: bool, green: bool) {
            self.writes.push(LedState { red, yellow, green });
        }
    }

    struct MockBuzzer {
        duties: std::vec::Vec<u8>,
    }

    impl MockBuzzer {
        fn pulses(&self) -> usize {
            self.duties.iter().filter(|d| **d > 0).count()
        }
    }

    impl BuzzerOutput for MockBuzzer {
        fn set_duty(&mut self, duty_percent: u8) {
            self.duties.push(duty_percent);
        }
    }

    struct MockDelay {
        elapsed_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.elapsed_ns += ns as u64;
        }
    }

    type TestLoop = ControlLoop<MockTouch, MockSensor, MockLeds, MockBuzzer, MockDelay>;

    fn controller(config: AlarmConfig) -> TestLoop {
        ControlLoop::new(
            config,
            0,
            MockTouch {
                toggle: Ok(UNTOUCHED),
                pause: Ok(UNTOUCHED),
            },
            MockSensor {
                next: Ok(Environment::from_whole(25, 50)),
            },
            MockLeds {
                writes: std::vec::Vec::new(),
            },
            MockBuzzer {
                duties: std::vec::Vec::new(),
            },
            MockDelay { elapsed_ns: 0 },
        )
    }

    fn default_controller() -> TestLoop {
        controller(AlarmConfig::default())
    }

    /// Press and release the toggle pad within one tick
    fn press_toggle(ctl: &mut TestLoop, now_ms: u64) -> TickReport {
        ctl.touch.toggle = Ok(TOUCHED);
        let report = ctl.tick(now_ms);
        ctl.touch.toggle = Ok(UNTOUCHED);
        report
    }

    fn press_pause(ctl: &mut TestLoop, now_ms: u64) -> TickReport {
        ctl.touch.pause = Ok(TOUCHED);
        let report = ctl.tick(now_ms);
        ctl.touch.pause = Ok(UNTOUCHED);
        report
    }

    #[test]
    fn test_outputs_start_off() {
        let ctl = default_controller();
        assert_eq!(ctl.leds.writes, vec![LedState::OFF]);
        assert_eq!(ctl.buzzer.duties, vec![0]);
        assert_eq!(ctl.leds(), LedState::OFF);
        assert_eq!(ctl.alarm().mode(), AlarmMode::Disabled);
    }

    #[test]
    fn test_normal_reading_lights_green() {
        let mut ctl = default_controller();
        let report = ctl.tick(2000);
        assert_eq!(ctl.leds(), LedState::GREEN);
        assert_eq!(
            report.events.as_slice(),
            &[ControlEvent::Reading {
                temperature_x10: 250,
                humidity_x10: 500
            }]
        );
        assert_eq!(ctl.buzzer.pulses(), 0);
    }

    #[test]
    fn test_toggle_enables_with_one_beep() {
        let mut ctl = default_controller();
        let report = press_toggle(&mut ctl, 2000);
        assert_eq!(report.events[0], ControlEvent::AlarmEnabled);
        assert_eq!(report.mode, AlarmMode::Enabled);
        assert_eq!(ctl.buzzer.pulses(), 1);
        assert_eq!(ctl.delay.elapsed_ns, 300_000_000);

        let report = press_toggle(&mut ctl, 4000);
        assert_eq!(report.events[0], ControlEvent::AlarmDisabled);
        assert_eq!(report.mode, AlarmMode::Disabled);
        assert_eq!(ctl.buzzer.pulses(), 2);
    }

    #[test]
    fn test_toggle_ignored_during_boot_block() {
        let mut ctl = default_controller();
        let report = press_toggle(&mut ctl, 1500);
        assert_eq!(report.mode, AlarmMode::Disabled);
        assert!(!report.events.iter().any(|e| e.is_transition()));
        assert_eq!(ctl.buzzer.pulses(), 0);
    }

    #[test]
    fn test_held_touch_is_debounced() {
        let mut ctl = default_controller();
        ctl.touch.toggle = Ok(TOUCHED);
        ctl.tick(2000);
        ctl.tick(2500);
        ctl.tick(2800);
        assert_eq!(ctl.alarm().mode(), AlarmMode::Enabled);
        assert_eq!(ctl.buzzer.pulses(), 1);

        // Past the window the held pad toggles again
        ctl.tick(2801);
        assert_eq!(ctl.alarm().mode(), AlarmMode::Disabled);
    }

    #[test]
    fn test_overheat_sounds_warning_when_enabled() {
        let mut ctl = default_controller();
        press_toggle(&mut ctl, 2000);
        ctl.sensor.next = Ok(Environment::from_whole(31, 95));
        let before = ctl.buzzer.pulses();
        let report = ctl.tick(4000);
        assert_eq!(ctl.leds(), LedState::RED);
        assert_eq!(ctl.buzzer.pulses() - before, 3);
        assert_eq!(
            report.output.map(|c| c.buzzer),
            Ok(Some(BuzzerPattern::WarningBeep))
        );
    }

    #[test]
    fn test_overheat_silent_when_disabled() {
        let mut ctl = default_controller();
        ctl.sensor.next = Ok(Environment::from_whole(31, 40));
        let report = ctl.tick(2000);
        assert_eq!(ctl.leds(), LedState::RED);
        assert_eq!(ctl.buzzer.pulses(), 0);
        assert!(!report.events.contains(&ControlEvent::WarningSuppressed));
    }

    #[test]
    fn test_pause_suppresses_warning_but_not_led() {
        let mut ctl = default_controller();
        press_toggle(&mut ctl, 2000);
        let report = press_pause(&mut ctl, 4000);
        assert!(report
            .events
            .contains(&ControlEvent::PauseAsserted { until_ms: 19_000 }));

        ctl.sensor.next = Ok(Environment::from_whole(31, 40));
        let before = ctl.buzzer.pulses();
        let report = ctl.tick(6000);
        assert_eq!(ctl.leds(), LedState::RED);
        assert_eq!(ctl.buzzer.pulses(), before);
        assert_eq!(report.mode, AlarmMode::EnabledPaused);
        assert!(report.events.contains(&ControlEvent::WarningSuppressed));
    }

    #[test]
    fn test_pause_recovery_beeps() {
        let mut ctl = default_controller();
        press_toggle(&mut ctl, 2000);
        press_pause(&mut ctl, 4000);

        let report = ctl.tick(19_000);
        assert_eq!(report.mode, AlarmMode::EnabledPaused);

        let before = ctl.buzzer.pulses();
        let report = ctl.tick(19_001);
        assert!(report.events.contains(&ControlEvent::PauseExpired));
        assert_eq!(report.mode, AlarmMode::Enabled);
        assert_eq!(ctl.buzzer.pulses() - before, 1);
    }

    #[test]
    fn test_repause_restarts_countdown() {
        let mut ctl = default_controller();
        press_toggle(&mut ctl, 2000);
        press_pause(&mut ctl, 10_000);
        press_pause(&mut ctl, 20_000);

        // First deadline (25s) passed, second (35s) not
        let report = ctl.tick(30_000);
        assert_eq!(report.mode, AlarmMode::EnabledPaused);
        let report = ctl.tick(35_000);
        assert_eq!(report.mode, AlarmMode::EnabledPaused);
        let report = ctl.tick(35_001);
        assert_eq!(report.mode, AlarmMode::Enabled);
    }

    #[test]
    fn test_pause_expiry_while_disabled_is_silent() {
        let mut ctl = default_controller();
        press_pause(&mut ctl, 2000);
        assert!(ctl.alarm().is_paused());
        assert_eq!(ctl.alarm().mode(), AlarmMode::Disabled);

        let report = ctl.tick(17_001);
        assert!(report.events.contains(&ControlEvent::PauseExpired));
        assert!(!ctl.alarm().is_paused());
        assert_eq!(ctl.buzzer.pulses(), 0);
    }

    #[test]
    fn test_sensor_failure_on_first_cycle_keeps_leds_off() {
        let mut ctl = default_controller();
        ctl.sensor.next = Err(SensorError::Timeout);
        let report = ctl.tick(2000);
        assert_eq!(report.output, Err(SensorError::Timeout));
        assert!(report
            .events
            .contains(&ControlEvent::SensorFailure(SensorError::Timeout)));
        assert_eq!(ctl.leds(), LedState::OFF);
        assert_eq!(ctl.leds.writes, vec![LedState::OFF]);
    }

    #[test]
    fn test_sensor_failure_leaves_previous_output() {
        let mut ctl = default_controller();
        press_toggle(&mut ctl, 2000);
        ctl.sensor.next = Ok(Environment::from_whole(35, 40));
        ctl.tick(4000);
        assert_eq!(ctl.leds(), LedState::RED);

        let writes = ctl.leds.writes.len();
        let pulses = ctl.buzzer.pulses();
        ctl.sensor.next = Err(SensorError::ChecksumMismatch);
        ctl.tick(6000);

        assert_eq!(ctl.leds(), LedState::RED);
        assert_eq!(ctl.leds.writes.len(), writes);
        assert_eq!(ctl.buzzer.pulses(), pulses);
    }

    #[test]
    fn test_touch_failure_is_a_missed_poll() {
        let mut ctl = default_controller();
        ctl.touch.toggle = Err(TouchError::PinFault);
        let report = ctl.tick(2000);
        assert_eq!(report.mode, AlarmMode::Disabled);
        assert!(report.events.contains(&ControlEvent::TouchReadFailed {
            channel: TouchChannelId::Toggle,
            error: TouchError::PinFault,
        }));
        // Loop still samples and drives outputs
        assert_eq!(ctl.leds(), LedState::GREEN);
    }

    #[test]
    fn test_humid_reading_lights_yellow_silently() {
        let mut ctl = default_controller();
        press_toggle(&mut ctl, 2000);
        let before = ctl.buzzer.pulses();
        ctl.sensor.next = Ok(Environment::from_whole(22, 85));
        ctl.tick(4000);
        assert_eq!(ctl.leds(), LedState::YELLOW);
        assert_eq!(ctl.buzzer.pulses(), before);
    }

    #[test]
    fn test_per_pulse_config_still_plays_full_warning() {
        let mut config = AlarmConfig::default();
        config.buzzer.pause_check = PauseCheck::PerPulse;
        let mut ctl = controller(config);
        press_toggle(&mut ctl, 2000);
        ctl.sensor.next = Ok(Environment::from_whole(31, 40));
        let before = ctl.buzzer.pulses();
        let report = ctl.tick(4000);
        assert_eq!(ctl.buzzer.pulses() - before, 3);
        assert!(!report.events.contains(&ControlEvent::WarningSuppressed));
    }
}
