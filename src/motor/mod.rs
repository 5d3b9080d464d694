//! Motor module for dual-axis-stepper.
//!
//! Provides the four-coil axis driver, its builder, limit sensors and the
//! bounds-checked motion controller.

mod builder;
mod controller;
mod driver;
pub mod phase;
mod sensor;
mod state;

pub use builder::AxisDriverBuilder;
pub use controller::{HomingOptions, MotionController};
pub use driver::{AxisDriver, AxisParts, MAX_ENABLE_PINS, MAX_INDICATOR_PINS};
pub use phase::{Phase, StepMode, COIL_COUNT, FULL_STEP_TABLE, HALF_STEP_TABLE};
pub use sensor::{LimitSensor, SensorFn};
pub use state::AxisState;
