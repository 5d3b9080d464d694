//! Per-axis configuration from TOML.

use embedded_hal::digital::PinState;
use serde::Deserialize;

use crate::motion::Direction;
use crate::motor::StepMode;

use super::bounds::MotionBounds;

/// Default inter-step delay in microseconds.
pub const DEFAULT_STEP_DELAY_US: u32 = 5000;

/// Default steps driven away from the limit sensor after homing.
pub const DEFAULT_RELEASE_STEPS: u32 = 50;

/// Logic level at which a limit sensor reports activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "lowercase")]
pub enum SensorLevel {
    /// Active when the input reads high.
    #[default]
    High,
    /// Active when the input reads low.
    Low,
}

impl SensorLevel {
    /// Equivalent embedded-hal pin state.
    #[inline]
    pub fn pin_state(self) -> PinState {
        match self {
            SensorLevel::High => PinState::High,
            SensorLevel::Low => PinState::Low,
        }
    }
}

/// Homing procedure for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HomingConfig {
    /// Logical direction driven toward the limit sensor.
    pub direction: Direction,

    /// Sensor level that ends the seek.
    pub active_level: SensorLevel,

    /// Steps driven in the opposite direction after activation.
    pub release_steps: u32,

    /// Optional step limit for the seek. Absent means wait forever.
    pub max_steps: Option<u32>,
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Backward,
            active_level: SensorLevel::High,
            release_steps: DEFAULT_RELEASE_STEPS,
            max_steps: None,
        }
    }
}

/// Complete axis configuration from TOML.
///
/// Pins are not part of the file; they are handed to
/// [`AxisDriverBuilder`](crate::motor::AxisDriverBuilder) by the HAL setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AxisConfig {
    /// Phase table to step through.
    #[serde(default)]
    pub step_mode: StepMode,

    /// Delay between steps in microseconds.
    #[serde(default = "default_step_delay_us")]
    pub step_delay_us: u32,

    /// Walk the phase table backwards for logical forward steps.
    #[serde(default)]
    pub invert_direction: bool,

    /// Allowed position range for MOVE_REL / MOVE_ABS.
    pub bounds: MotionBounds,

    /// Homing procedure.
    #[serde(default)]
    pub homing: HomingConfig,

    /// Relative move performed after every homing cycle of the homing loop
    /// and at startup.
    #[serde(default)]
    pub startup_displacement: i64,
}

fn default_step_delay_us() -> u32 {
    DEFAULT_STEP_DELAY_US
}

impl AxisConfig {
    /// Configuration with the given bounds and every other field defaulted.
    pub fn with_bounds(bounds: MotionBounds) -> Self {
        Self {
            step_mode: StepMode::default(),
            step_delay_us: DEFAULT_STEP_DELAY_US,
            invert_direction: false,
            bounds,
            homing: HomingConfig::default(),
            startup_displacement: 0,
        }
    }

    /// Factory setup of axis A (bounds `[0, 5000]`, inverted).
    pub fn default_a() -> Self {
        Self::factory(MotionBounds::new(0, 5000))
    }

    /// Factory setup of axis B (bounds `[0, 2000]`, inverted).
    pub fn default_b() -> Self {
        Self::factory(MotionBounds::new(0, 2000))
    }

    // Both factory axes are wired so that logical forward runs the table backwards.
    fn factory(bounds: MotionBounds) -> Self {
        Self {
            invert_direction: true,
            ..Self::with_bounds(bounds)
        }
    }

    /// Position the axis is recalibrated to after homing.
    #[inline]
    pub fn home_position(&self) -> i64 {
        self.bounds.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_axes() {
        let a = AxisConfig::default_a();
        let b = AxisConfig::default_b();

        assert_eq!(a.bounds, MotionBounds::new(0, 5000));
        assert_eq!(b.bounds, MotionBounds::new(0, 2000));
        assert_eq!(a.step_mode, StepMode::HalfStep);
        assert_eq!(a.step_delay_us, 5000);
        assert!(a.invert_direction && b.invert_direction);
        assert_eq!(a.homing.direction, Direction::Backward);
        assert_eq!(a.homing.release_steps, 50);
        assert_eq!(a.home_position(), 0);
    }

    #[test]
    fn test_inversion_off_unless_factory() {
        assert!(!AxisConfig::with_bounds(MotionBounds::new(0, 10)).invert_direction);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_omitted_inversion_is_off() {
        let parsed: AxisConfig = toml::from_str("[bounds]\nmin = 0\nmax = 10\n").unwrap();
        assert!(!parsed.invert_direction);
    }

    #[test]
    fn test_sensor_level() {
        assert_eq!(SensorLevel::High.pin_state(), PinState::High);
        assert_eq!(SensorLevel::Low.pin_state(), PinState::Low);
    }
}
