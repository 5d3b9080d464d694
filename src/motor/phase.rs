//! Coil phase tables and stepping modes.

use serde::Deserialize;

/// Number of coil outputs driven per axis.
pub const COIL_COUNT: usize = 4;

/// Coil pattern for one phase, in `IN1..IN4` order (1 = energized).
pub type Phase = [u8; COIL_COUNT];

/// Full-step sequence (two coils energized per phase).
pub const FULL_STEP_TABLE: [Phase; 4] = [
    [1, 0, 1, 0],
    [0, 1, 1, 0],
    [0, 1, 0, 1],
    [1, 0, 0, 1],
];

/// Half-step sequence (alternating one and two coils energized).
pub const HALF_STEP_TABLE: [Phase; 8] = [
    [1, 0, 1, 0],
    [1, 0, 1, 1],
    [1, 0, 0, 1],
    [0, 0, 0, 1],
    [0, 1, 0, 1],
    [0, 1, 1, 1],
    [0, 1, 1, 0],
    [0, 0, 1, 0],
];

/// Stepping mode of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// 4-entry phase table.
    FullStep,
    /// 8-entry phase table.
    #[default]
    HalfStep,
}

impl StepMode {
    /// Phase table for this mode.
    #[inline]
    pub fn table(self) -> &'static [Phase] {
        match self {
            StepMode::FullStep => &FULL_STEP_TABLE,
            StepMode::HalfStep => &HALF_STEP_TABLE,
        }
    }

    /// Number of entries in the phase table.
    #[inline]
    pub fn table_len(self) -> usize {
        self.table().len()
    }

    /// Index reached from `index` after one physical step.
    ///
    /// `index` must already be valid for this mode. Wraps in both directions.
    #[inline]
    pub fn next_index(self, index: usize, forward: bool) -> usize {
        let len = self.table_len();
        if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        }
    }
}
