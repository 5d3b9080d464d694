//! Structured command results and their wire rendering.

use core::fmt::{self, Write};

use crate::error::{CommandError, Error, MotorError};

/// Maximum length of a result message.
pub const MESSAGE_CAPACITY: usize = 96;

/// Command list printed at startup and after an unknown command.
pub const HELP_TEXT: &str = "\
Commands:
  HOME                     - Home both drivers A and B
  HOME_LOOP                - Start or stop the repeating homing loop
  MOVE_REL A <steps>       - Move Driver A relative steps
  MOVE_REL B <steps>       - Move Driver B relative steps
  MOVE_ABS A <position>    - Move Driver A to absolute position
  MOVE_ABS B <position>    - Move Driver B to absolute position
  GETPOS                   - Get current positions";

/// Overall outcome as sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// `success`
    Success,
    /// `error`
    Error,
}

impl Status {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Error => "error",
        }
    }
}

/// Result taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResultCode {
    /// Command executed.
    Ok,
    /// Target equals the current position; nothing moved.
    NoOp,
    /// Target outside the axis bounds; nothing moved.
    OutOfBounds,
    /// Selector is neither `A` nor `B`.
    InvalidAxis,
    /// Numeric argument missing or malformed.
    InvalidArgument,
    /// Verb not recognized, or the line was unusable.
    UnknownCommand,
    /// Pin or sensor failure, or bounded homing gave up.
    HardwareFault,
}

impl ResultCode {
    /// Map to the wire status. `NoOp` counts as success.
    pub fn status(self) -> Status {
        match self {
            ResultCode::Ok | ResultCode::NoOp => Status::Success,
            _ => Status::Error,
        }
    }
}

/// Outcome of one dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    code: ResultCode,
    message: heapless::String<MESSAGE_CAPACITY>,
}

impl CommandResult {
    /// Build a result from a code and formatted message.
    ///
    /// Messages longer than [`MESSAGE_CAPACITY`] are cut short.
    pub fn new(code: ResultCode, message: fmt::Arguments<'_>) -> Self {
        let mut buf = Truncating(heapless::String::new());
        let _ = buf.write_fmt(message);
        Self {
            code,
            message: buf.0,
        }
    }

    /// Successful result with a fixed message.
    pub fn ok(message: &str) -> Self {
        Self::new(ResultCode::Ok, format_args!("{}", message))
    }

    /// Result for a crate error.
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::Command(e) => Self::from(*e),
            Error::Motor(MotorError::OutOfBounds { .. }) => Self::new(
                ResultCode::OutOfBounds,
                format_args!("Movement out of bounds."),
            ),
            Error::Motor(e) => Self::new(ResultCode::HardwareFault, format_args!("{}", e)),
            Error::Config(e) => Self::new(ResultCode::HardwareFault, format_args!("{}", e)),
        }
    }

    /// Taxonomy code.
    #[inline]
    pub fn code(&self) -> ResultCode {
        self.code
    }

    /// Wire status.
    #[inline]
    pub fn status(&self) -> Status {
        self.code.status()
    }

    /// Check for a success status.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.status() == Status::Success
    }

    /// Human-readable message.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl From<CommandError> for CommandResult {
    fn from(error: CommandError) -> Self {
        let code = match error {
            CommandError::UnknownCommand
            | CommandError::LineTooLong
            | CommandError::InvalidEncoding => ResultCode::UnknownCommand,
            CommandError::InvalidAxis => ResultCode::InvalidAxis,
            CommandError::InvalidArgument => ResultCode::InvalidArgument,
        };
        Self::new(code, format_args!("{}", error))
    }
}

/// Renders the connection-oriented framing: `"status", "message"`.
impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\", \"{}\"", self.status().as_str(), self.message)
    }
}

/// Writer that keeps as much of the output as fits.
struct Truncating<const N: usize>(heapless::String<N>);

impl<const N: usize> Write for Truncating<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}
