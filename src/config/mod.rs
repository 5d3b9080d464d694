//! Configuration module for dual-axis-stepper.
//!
//! Provides types for loading and validating axis, homing and transport
//! settings from TOML files (with `std` feature) or pre-built values.

mod axis;
mod bounds;
#[cfg(feature = "std")]
mod loader;
mod system;
mod validation;

pub use axis::{AxisConfig, HomingConfig, SensorLevel, DEFAULT_RELEASE_STEPS, DEFAULT_STEP_DELAY_US};
pub use bounds::MotionBounds;
pub use system::{HomingLoopConfig, SystemConfig, TransportConfig, DEFAULT_HOMING_LOOP_INTERVAL_MS};
pub use validation::{validate_axis, validate_config};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
