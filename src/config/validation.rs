//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::motion::AxisSelector;

use super::{AxisConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks, per axis:
/// - Bounds are valid (min < max)
/// - Inter-step delay is positive
/// - Homing step limit, when given, is positive
/// - Startup displacement from the home position stays inside the bounds
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for selector in AxisSelector::ALL {
        validate_axis(config.axis(selector))?;
    }
    Ok(())
}

/// Validate one axis configuration.
pub fn validate_axis(config: &AxisConfig) -> Result<()> {
    let bounds = config.bounds;
    if !bounds.is_valid() {
        return Err(Error::Config(ConfigError::InvalidBounds {
            min: bounds.min,
            max: bounds.max,
        }));
    }

    if config.step_delay_us == 0 {
        return Err(Error::Config(ConfigError::InvalidStepDelay(0)));
    }

    if config.homing.max_steps == Some(0) {
        return Err(Error::Config(ConfigError::InvalidHomingStepLimit(0)));
    }

    let settled = config.home_position().checked_add(config.startup_displacement);
    if !settled.is_some_and(|position| bounds.contains(position)) {
        return Err(Error::Config(ConfigError::InvalidStartupDisplacement {
            displacement: config.startup_displacement,
            min: bounds.min,
            max: bounds.max,
        }));
    }

    Ok(())
}
