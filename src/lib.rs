//! # dual-axis-stepper
//!
//! Two-axis stepper control over four-coil phase tables, with homing against
//! limit sensors and a small text command protocol, built on embedded-hal 1.0.
//!
//! ## Features
//!
//! - **Phase sequencing**: exact full-step and half-step coil tables
//! - **embedded-hal 1.0**: `OutputPin` for coils, `InputPin` for limit
//!   sensors, `DelayNs` for timing
//! - **no_std compatible**: Core library works without standard library
//! - **Bounds-checked moves**: Out-of-range targets are rejected before the
//!   first step
//! - **Homing**: Unbounded by default, with opt-in step limit and abort hook
//! - **Text protocol**: `HOME`, `HOME_LOOP`, `MOVE_REL`, `MOVE_ABS`, `GETPOS`
//!   over any [`LineTransport`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dual_axis_stepper::{AxisDriver, Axis, MotionSystem, SystemConfig};
//! use dual_axis_stepper::transport::TcpTransport;
//!
//! let config: SystemConfig = dual_axis_stepper::load_config("bench.toml")?;
//!
//! let driver_a = AxisDriver::builder()
//!     .name("A")
//!     .coil_pins(in1, in2, in3, in4)
//!     .enable_pin(ena)
//!     .enable_pin(enb)
//!     .indicator_pin(Some(led1))
//!     .from_axis_config(&config.axis_a)
//!     .delay(delay.clone())
//!     .build()?;
//! // ... driver_b likewise
//!
//! let mut system = MotionSystem::new(
//!     Axis::new(driver_a, limit_a, config.axis_a),
//!     Axis::new(driver_b, limit_b, config.axis_b),
//!     delay,
//!     &config.homing_loop,
//! );
//! system.startup()?;
//!
//! let mut transport = TcpTransport::from_config(&config.transport)?;
//! system.run(&mut transport)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables TOML file loading, the console and TCP
//!   transports, and `tracing` logging
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

// Core modules
pub mod command;
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;
pub mod system;
pub mod transport;

// Re-exports for ergonomic API
pub use command::{dispatch, dispatch_line, Command, CommandResult, ResultCode, Status};
pub use config::{validate_config, AxisConfig, HomingConfig, MotionBounds, SystemConfig};
pub use error::{Error, Result};
pub use motion::{AxisSelector, Direction, HomingReport, MoveOutcome};
pub use motor::{AxisDriver, AxisDriverBuilder, HomingOptions, LimitSensor, MotionController, StepMode};
pub use system::{Axis, HomingLoopState, MotionSystem};
pub use transport::LineTransport;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
