//! Mutable per-axis state.

use crate::motion::Direction;

use super::phase::StepMode;

/// Phase and position bookkeeping for one axis.
///
/// Only [`AxisDriver`](super::AxisDriver) and
/// [`MotionController`](super::MotionController) mutate this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisState {
    /// Index into the active phase table.
    phase_index: usize,
    /// Logical position in steps.
    position: i64,
    /// Enable outputs driven high by `begin()`.
    enabled: bool,
    /// At least one coil is energized.
    energized: bool,
}

impl AxisState {
    /// Current phase table index.
    #[inline]
    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    /// Current logical position in steps.
    #[inline]
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Whether `begin()` has enabled the driver channels.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the coils currently hold a phase pattern.
    #[inline]
    pub fn is_energized(&self) -> bool {
        self.energized
    }

    pub(crate) fn reset(&mut self) {
        *self = Self {
            enabled: true,
            ..Self::default()
        };
    }

    pub(crate) fn advance_phase(&mut self, mode: StepMode, forward: bool) -> usize {
        self.phase_index = mode.next_index(self.phase_index, forward);
        self.energized = true;
        self.phase_index
    }

    /// Re-reduce the phase index after a table change.
    pub(crate) fn rebase_phase(&mut self, mode: StepMode) {
        self.phase_index %= mode.table_len();
    }

    pub(crate) fn de_energize(&mut self) {
        self.energized = false;
    }

    pub(crate) fn count_step(&mut self, direction: Direction) {
        self.position += direction.sign();
    }

    pub(crate) fn set_position(&mut self, position: i64) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_keeps_only_enabled() {
        let mut state = AxisState::default();
        state.set_position(42);
        state.advance_phase(StepMode::HalfStep, true);
        state.reset();

        assert_eq!(state.position(), 0);
        assert_eq!(state.phase_index(), 0);
        assert!(state.is_enabled());
        assert!(!state.is_energized());
    }

    #[test]
    fn test_rebase_after_mode_change() {
        let mut state = AxisState::default();
        for _ in 0..6 {
            state.advance_phase(StepMode::HalfStep, true);
        }
        assert_eq!(state.phase_index(), 6);

        state.rebase_phase(StepMode::FullStep);
        assert_eq!(state.phase_index(), 2);
    }

    #[test]
    fn test_count_step() {
        let mut state = AxisState::default();
        state.count_step(Direction::Backward);
        state.count_step(Direction::Backward);
        state.count_step(Direction::Forward);
        assert_eq!(state.position(), -1);
    }
}
