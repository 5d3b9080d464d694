//! Results of completed motion operations.

/// Outcome of a bounded relative or absolute move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveOutcome {
    /// Steps were executed.
    Moved {
        /// Number of physical steps taken.
        steps: u64,
        /// Position after the move.
        position: i64,
    },
    /// Target equals the current position; nothing was driven.
    NoOp {
        /// Unchanged position.
        position: i64,
    },
}

impl MoveOutcome {
    /// Position after the operation.
    #[inline]
    pub fn position(&self) -> i64 {
        match *self {
            MoveOutcome::Moved { position, .. } | MoveOutcome::NoOp { position } => position,
        }
    }

    /// Number of steps executed.
    #[inline]
    pub fn steps(&self) -> u64 {
        match *self {
            MoveOutcome::Moved { steps, .. } => steps,
            MoveOutcome::NoOp { .. } => 0,
        }
    }

    /// Check if no movement happened.
    #[inline]
    pub fn is_noop(&self) -> bool {
        matches!(self, MoveOutcome::NoOp { .. })
    }
}

/// Summary of a completed homing run.
///
/// Positions are in the axis's uncalibrated frame; the caller decides what
/// reference value to assign afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HomingReport {
    /// Steps driven before the sensor reported the active level.
    pub steps_to_trigger: u32,
    /// Position at which the sensor activated.
    pub trigger_position: i64,
    /// Position after the release move.
    pub final_position: i64,
}
