//! System configuration - root configuration structure.

use heapless::String;
use serde::Deserialize;

use crate::motion::AxisSelector;

use super::axis::AxisConfig;

/// Default pause between homing loop iterations in milliseconds.
pub const DEFAULT_HOMING_LOOP_INTERVAL_MS: u32 = 1000;

/// Homing loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HomingLoopConfig {
    /// Pause after every loop iteration.
    pub interval_ms: u32,
}

impl Default for HomingLoopConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_HOMING_LOOP_INTERVAL_MS,
        }
    }
}

/// Settings for the std transport adapters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Listen address of the TCP transport.
    pub tcp_bind: String<64>,

    /// Read timeout for an accepted TCP connection.
    pub read_timeout_ms: u32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tcp_bind: String::try_from("0.0.0.0:80").unwrap_or_default(),
            read_timeout_ms: 2000,
        }
    }
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemConfig {
    /// Axis `A`.
    #[serde(default = "AxisConfig::default_a")]
    pub axis_a: AxisConfig,

    /// Axis `B`.
    #[serde(default = "AxisConfig::default_b")]
    pub axis_b: AxisConfig,

    /// Homing loop timing.
    #[serde(default)]
    pub homing_loop: HomingLoopConfig,

    /// Transport adapter settings.
    #[serde(default)]
    pub transport: TransportConfig,
}

impl SystemConfig {
    /// Get an axis configuration by selector.
    pub fn axis(&self, selector: AxisSelector) -> &AxisConfig {
        match selector {
            AxisSelector::A => &self.axis_a,
            AxisSelector::B => &self.axis_b,
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            axis_a: AxisConfig::default_a(),
            axis_b: AxisConfig::default_b(),
            homing_loop: HomingLoopConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}
