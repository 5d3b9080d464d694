//! Logical step direction.

use serde::Deserialize;

/// Direction of a logical step.
///
/// Logical forward always increments the tracked position, whatever the
/// axis's direction inversion flag says about the physical phase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Positive step count.
    Forward,
    /// Negative step count.
    Backward,
}

impl Direction {
    /// Get direction from a `forward: bool` flag.
    #[inline]
    pub fn from_forward(forward: bool) -> Self {
        if forward {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Get direction from a signed step delta (zero counts as forward).
    #[inline]
    pub fn from_delta(delta: i64) -> Self {
        Self::from_forward(delta >= 0)
    }

    /// Check if this is the forward direction.
    #[inline]
    pub fn is_forward(self) -> bool {
        self == Direction::Forward
    }

    /// Get the opposite direction.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// Lowercase name for log output.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}
