//! Motion module for dual-axis-stepper.
//!
//! Provides logical step direction, axis selection and move outcome types
//! shared by the drivers, controllers and command dispatcher.

mod direction;
mod outcome;
mod selector;

pub use direction::Direction;
pub use outcome::{HomingReport, MoveOutcome};
pub use selector::AxisSelector;
