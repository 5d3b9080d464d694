//! Line-in / result-out transports.
//!
//! The motion system only sees [`LineTransport`]. The console and TCP
//! adapters (std) are thin wrappers that move lines between an I/O channel
//! and the polling loop.

use crate::command::CommandResult;

#[cfg(feature = "std")]
mod console;
#[cfg(feature = "std")]
mod tcp;

#[cfg(feature = "std")]
pub use console::ConsoleTransport;
#[cfg(feature = "std")]
pub use tcp::TcpTransport;

/// Longest accepted command line in bytes, after trimming.
pub const MAX_LINE_LEN: usize = 128;

/// Buffer a transport fills with one command line.
pub type LineBuffer = heapless::String<MAX_LINE_LEN>;

/// What [`LineTransport::poll_line`] put in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Received {
    /// A trimmed command line.
    Line,
    /// The line did not fit; the buffer is empty.
    Overflow,
    /// The line was not valid UTF-8; the buffer is empty.
    Invalid,
}

/// Source of command lines and sink of their results.
pub trait LineTransport {
    /// Transport I/O error.
    type Error;

    /// Fetch the next command line without blocking for new input.
    ///
    /// Returns `Ok(None)` when no line is available.
    fn poll_line(&mut self, line: &mut LineBuffer) -> Result<Option<Received>, Self::Error>;

    /// Deliver the result of the line returned by the last `poll_line`.
    fn respond(&mut self, result: &CommandResult) -> Result<(), Self::Error>;

    /// Out-of-band message not tied to a command.
    fn notify(&mut self, _message: &str) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Trim `raw` into `line`.
pub fn load_line(line: &mut LineBuffer, raw: &str) -> Received {
    line.clear();
    if line.push_str(raw.trim()).is_err() {
        line.clear();
        return Received::Overflow;
    }
    Received::Line
}

/// Decode `raw` as UTF-8 and trim it into `line`.
pub fn load_bytes(line: &mut LineBuffer, raw: &[u8]) -> Received {
    match core::str::from_utf8(raw) {
        Ok(text) => load_line(line, text),
        Err(_) => {
            line.clear();
            Received::Invalid
        }
    }
}
