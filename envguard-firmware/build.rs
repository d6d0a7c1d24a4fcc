//! Build script for envguard-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates alarm.toml and bakes it into the firmware as a constant

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use envguard_core::config::AlarmConfig;

fn main() {
    setup_linker();
    generate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse and validate alarm.toml, then write alarm_config.rs
fn generate_config() {
    println!("cargo:rerun-if-changed=alarm.toml");

    let config_path = Path::new("alarm.toml");

    if !config_path.exists() {
        fail(
            "alarm.toml not found!",
            "The firmware requires an alarm.toml configuration file\n\
             in the envguard-firmware directory.",
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read alarm.toml", &e.to_string()),
    };

    let config: AlarmConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => fail("Invalid alarm.toml", &e.to_string()),
    };

    if let Err(e) = config.validate() {
        fail("Invalid value in alarm.toml", &e.to_string());
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("alarm_config.rs")).unwrap();
    f.write_all(render_config(&config).as_bytes()).unwrap();

    println!("cargo:warning=alarm.toml validated successfully");
}

/// Rust source for the config constant
fn render_config(config: &AlarmConfig) -> String {
    let touch = &config.touch;
    let timing = &config.timing;
    let policy = &config.policy;
    let buzzer = &config.buzzer;
    let pattern = |p: &envguard_core::config::PulsePattern| {
        format!(
            "PulsePattern {{ pulses: {}, on_ms: {}, off_ms: {} }}",
            p.pulses, p.on_ms, p.off_ms
        )
    };

    format!(
        "/// Generated from alarm.toml by build.rs\n\
         pub const ALARM_CONFIG: AlarmConfig = AlarmConfig {{\n    \
             touch: TouchConfig {{ toggle_threshold: {}, pause_threshold: {}, debounce_ms: {}, boot_block_ms: {} }},\n    \
             timing: TimingConfig {{ pause_duration_ms: {}, poll_interval_ms: {} }},\n    \
             policy: PolicyConfig {{ temperature_threshold_x10: {}, humidity_threshold_x10: {} }},\n    \
             buzzer: BuzzerConfig {{ duty_percent: {}, single_beep: {}, warning_beep: {}, pause_check: PauseCheck::{:?} }},\n\
         }};\n",
        touch.toggle_threshold,
        touch.pause_threshold,
        touch.debounce_ms,
        touch.boot_block_ms,
        timing.pause_duration_ms,
        timing.poll_interval_ms,
        policy.temperature_threshold_x10,
        policy.humidity_threshold_x10,
        buzzer.duty_percent,
        pattern(&buzzer.single_beep),
        pattern(&buzzer.warning_beep),
        buzzer.pause_check,
    )
}

/// Abort the build with a boxed message
fn fail(title: &str, detail: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(detail)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
