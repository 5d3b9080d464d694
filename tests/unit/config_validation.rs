//! Unit tests for configuration validation.

use dual_axis_stepper::config::{parse_config, validate_config, MotionBounds, SystemConfig};
use dual_axis_stepper::error::{ConfigError, Error};

/// Test that inverted bounds are rejected.
#[test]
fn test_inverted_bounds_rejected() {
    let toml = r#"
[axis_b.bounds]
min = 2000
max = 0
"#;

    let result = parse_config(toml);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidBounds { min: 2000, max: 0 }))
    ));
}

/// Test that a zero inter-step delay is rejected.
#[test]
fn test_zero_step_delay_rejected() {
    let mut config = SystemConfig::default();
    config.axis_a.step_delay_us = 0;

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidStepDelay(0)))
    ));
}

/// Test that a zero homing step limit is rejected.
#[test]
fn test_zero_homing_limit_rejected() {
    let mut config = SystemConfig::default();
    config.axis_b.homing.max_steps = Some(0);

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidHomingStepLimit(0)))
    ));
}

/// Test that the startup displacement must keep the axis inside its bounds.
#[test]
fn test_startup_displacement_bounds() {
    let mut config = SystemConfig::default();
    config.axis_a.bounds = MotionBounds::new(-100, 100);

    config.axis_a.startup_displacement = 200;
    assert!(validate_config(&config).is_ok());

    config.axis_a.startup_displacement = -1;
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidStartupDisplacement {
            displacement: -1,
            min: -100,
            max: 100
        }))
    ));
}

/// Test that validation errors render a readable message.
#[test]
fn test_error_display() {
    let error = Error::Config(ConfigError::InvalidBounds { min: 5, max: 1 });
    assert_eq!(
        error.to_string(),
        "Configuration error: Invalid bounds: min (5) must be < max (1)"
    );
}
