//! Error types for dual-axis-stepper.
//!
//! Provides unified error handling across configuration, motor control, and command parsing.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all dual-axis-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor operation error
    Motor(MotorError),
    /// Command line parsing error
    Command(CommandError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// A required builder field was never supplied
    MissingField(&'static str),
    /// More pins of one kind than the driver can hold
    PinLimit(&'static str),
    /// Invalid motion bounds (min must be < max)
    InvalidBounds {
        /// Minimum position
        min: i64,
        /// Maximum position
        max: i64,
    },
    /// Inter-step delay must be > 0
    InvalidStepDelay(u32),
    /// Homing step limit must be > 0 when given
    InvalidHomingStepLimit(u32),
    /// Startup displacement would leave the axis outside its bounds
    InvalidStartupDisplacement {
        /// Configured displacement in steps
        displacement: i64,
        /// Minimum position
        min: i64,
        /// Maximum position
        max: i64,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Coil, enable or indicator pin write failed
    PinError,
    /// Limit sensor read failed
    SensorError,
    /// Requested target lies outside the inclusive bounds
    OutOfBounds {
        /// Requested target position
        target: i64,
        /// Minimum allowed position
        min: i64,
        /// Maximum allowed position
        max: i64,
    },
    /// Homing reached its step limit without the sensor activating
    HomingStepLimit {
        /// Steps taken before giving up
        steps: u32,
    },
    /// Homing was aborted by the caller
    HomingAborted {
        /// Steps taken before the abort
        steps: u32,
    },
}

/// Command parsing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Verb is not part of the protocol
    UnknownCommand,
    /// Axis selector is neither `A` nor `B`
    InvalidAxis,
    /// Numeric argument is missing or not an integer
    InvalidArgument,
    /// Line exceeds the transport buffer
    LineTooLong,
    /// Line is not valid UTF-8
    InvalidEncoding,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Command(e) => write!(f, "Command error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            ConfigError::PinLimit(msg) => write!(f, "Pin limit exceeded: {}", msg),
            ConfigError::InvalidBounds { min, max } => {
                write!(f, "Invalid bounds: min ({}) must be < max ({})", min, max)
            }
            ConfigError::InvalidStepDelay(v) => write!(f, "Invalid step delay: {} us. Must be > 0", v),
            ConfigError::InvalidHomingStepLimit(v) => {
                write!(f, "Invalid homing step limit: {}. Must be > 0", v)
            }
            ConfigError::InvalidStartupDisplacement { displacement, min, max } => write!(
                f,
                "Startup displacement {} leaves the axis outside [{}, {}]",
                displacement, min, max
            ),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::SensorError => write!(f, "Limit sensor read failed"),
            MotorError::OutOfBounds { target, min, max } => {
                write!(f, "Target position {} outside bounds [{}, {}]", target, min, max)
            }
            MotorError::HomingStepLimit { steps } => {
                write!(f, "Limit sensor not reached after {} steps", steps)
            }
            MotorError::HomingAborted { steps } => write!(f, "Homing aborted after {} steps", steps),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::UnknownCommand => write!(f, "Unknown command."),
            CommandError::InvalidAxis => write!(f, "Invalid motor identifier."),
            CommandError::InvalidArgument => write!(f, "Invalid numeric argument."),
            CommandError::LineTooLong => write!(f, "Command line too long."),
            CommandError::InvalidEncoding => write!(f, "Command line is not valid text."),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}
