//! Alarm configuration
//!
//! `ALARM_CONFIG` is generated from alarm.toml by build.rs, which has
//! already run `AlarmConfig::validate` on it.

use envguard_core::config::{
    AlarmConfig, BuzzerConfig, PauseCheck, PolicyConfig, PulsePattern, TimingConfig, TouchConfig,
};

include!(concat!(env!("OUT_DIR"), "/alarm_config.rs"));
