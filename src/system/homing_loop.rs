//! Homing loop toggle.

use crate::config::HomingLoopConfig;

/// State of the repeating homing loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingLoopState {
    /// No background homing.
    #[default]
    Idle,
    /// Every polling pass runs one homing cycle.
    Active,
}

impl HomingLoopState {
    /// Lowercase name for log output.
    pub fn as_str(self) -> &'static str {
        match self {
            HomingLoopState::Idle => "idle",
            HomingLoopState::Active => "active",
        }
    }
}

/// Owns the homing loop state and its inter-iteration pause.
///
/// Toggling never moves an axis; the polling loop observes the state between
/// iterations only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomingLoopSupervisor {
    state: HomingLoopState,
    interval_ms: u32,
}

impl HomingLoopSupervisor {
    /// Create an idle supervisor.
    pub fn new(config: &HomingLoopConfig) -> Self {
        Self {
            state: HomingLoopState::Idle,
            interval_ms: config.interval_ms,
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> HomingLoopState {
        self.state
    }

    /// Check if the loop is running.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == HomingLoopState::Active
    }

    /// Pause after every iteration in milliseconds.
    #[inline]
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Flip the state and return the new one.
    pub fn toggle(&mut self) -> HomingLoopState {
        self.state = match self.state {
            HomingLoopState::Idle => HomingLoopState::Active,
            HomingLoopState::Active => HomingLoopState::Idle,
        };
        info!("Homing loop {}", self.state.as_str());
        self.state
    }

    /// Force the loop back to idle.
    pub fn stop(&mut self) {
        self.state = HomingLoopState::Idle;
    }
}

impl Default for HomingLoopSupervisor {
    fn default() -> Self {
        Self::new(&HomingLoopConfig::default())
    }
}
