//! Inclusive motion bounds.

use serde::Deserialize;

use crate::error::MotorError;

/// Inclusive `[min, max]` position range in steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionBounds {
    /// Minimum allowed position.
    pub min: i64,
    /// Maximum allowed position.
    pub max: i64,
}

impl MotionBounds {
    /// Create new bounds.
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Check if bounds are valid (min < max).
    pub fn is_valid(&self) -> bool {
        self.min < self.max
    }

    /// Check if a position is within bounds.
    pub fn contains(&self, position: i64) -> bool {
        position >= self.min && position <= self.max
    }

    /// Reject `target` with [`MotorError::OutOfBounds`] if it lies outside.
    pub fn check(&self, target: i64) -> Result<(), MotorError> {
        if self.contains(target) {
            Ok(())
        } else {
            Err(MotorError::OutOfBounds {
                target,
                min: self.min,
                max: self.max,
            })
        }
    }
}
