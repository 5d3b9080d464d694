//! Unit tests for TOML configuration parsing.

use std::io::Write;

use dual_axis_stepper::config::{
    load_config, parse_config, MotionBounds, SensorLevel, SystemConfig,
};
use dual_axis_stepper::{Direction, StepMode};

const BENCH_CONFIG: &str = r#"
[axis_a]
step_mode = "half_step"
step_delay_us = 5000
invert_direction = true
startup_displacement = 250

[axis_a.bounds]
min = 0
max = 5000

[axis_a.homing]
direction = "backward"
active_level = "high"
release_steps = 50

[axis_b]
step_mode = "full_step"
step_delay_us = 3000
invert_direction = false

[axis_b.bounds]
min = -1000
max = 1000

[axis_b.homing]
direction = "forward"
active_level = "low"
release_steps = 80
max_steps = 12000

[homing_loop]
interval_ms = 2500

[transport]
tcp_bind = "127.0.0.1:8080"
read_timeout_ms = 500
"#;

/// Test parsing a complete bench configuration.
#[test]
fn test_parse_bench_config() {
    let config = parse_config(BENCH_CONFIG).expect("Failed to parse TOML");

    assert_eq!(config.axis_a.step_mode, StepMode::HalfStep);
    assert_eq!(config.axis_a.startup_displacement, 250);
    assert_eq!(config.axis_a.bounds, MotionBounds::new(0, 5000));

    let b = &config.axis_b;
    assert_eq!(b.step_mode, StepMode::FullStep);
    assert_eq!(b.step_delay_us, 3000);
    assert!(!b.invert_direction);
    assert_eq!(b.bounds, MotionBounds::new(-1000, 1000));
    assert_eq!(b.homing.direction, Direction::Forward);
    assert_eq!(b.homing.active_level, SensorLevel::Low);
    assert_eq!(b.homing.release_steps, 80);
    assert_eq!(b.homing.max_steps, Some(12000));

    assert_eq!(config.homing_loop.interval_ms, 2500);
    assert_eq!(config.transport.tcp_bind.as_str(), "127.0.0.1:8080");
    assert_eq!(config.transport.read_timeout_ms, 500);
}

/// Test that omitted sections fall back to the factory setup.
#[test]
fn test_defaults_match_factory_setup() {
    let config = parse_config("[homing_loop]\ninterval_ms = 1000\n").unwrap();
    let factory = SystemConfig::default();

    assert_eq!(config, factory);
    assert_eq!(factory.axis_a.bounds, MotionBounds::new(0, 5000));
    assert_eq!(factory.axis_b.bounds, MotionBounds::new(0, 2000));
    assert!(factory.axis_a.invert_direction);
    assert!(factory.axis_b.invert_direction);
    assert_eq!(factory.axis_a.homing.max_steps, None);
    assert_eq!(factory.transport.tcp_bind.as_str(), "0.0.0.0:80");
}

/// Test that an axis table without bounds is rejected.
#[test]
fn test_axis_requires_bounds() {
    let result = toml::from_str::<SystemConfig>("[axis_a]\nstep_delay_us = 100\n");
    assert!(result.is_err());
}

/// Test loading from a file on disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join(format!(
        "dual-axis-stepper-{}.toml",
        std::process::id()
    ));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(BENCH_CONFIG.as_bytes()).unwrap();
    drop(file);

    let config = load_config(&path);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.unwrap().homing_loop.interval_ms, 2500);
}

/// Test that a missing file is reported as an I/O error.
#[test]
fn test_load_missing_file() {
    let result = load_config("/nonexistent/dual-axis-stepper.toml");
    assert!(matches!(
        result,
        Err(dual_axis_stepper::Error::Config(
            dual_axis_stepper::error::ConfigError::IoError(_)
        ))
    ));
}
