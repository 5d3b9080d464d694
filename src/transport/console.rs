//! Line-oriented console transport (std only).
//!
//! Any `BufRead` source works: stdin, a serial port device, a pipe.

use std::io::{self, BufRead, Read, Write};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::command::{CommandResult, ResultCode, HELP_TEXT};

use super::{load_bytes, LineBuffer, LineTransport, Received, MAX_LINE_LEN};

/// One line as seen by the reader thread.
enum RawLine {
    Bytes(Vec<u8>),
    TooLong,
}

/// Console transport with free-form output.
///
/// Input is read by a background thread so that polling never blocks. The
/// thread only forwards lines; it never touches axis state.
pub struct ConsoleTransport<W: Write> {
    lines: Receiver<io::Result<RawLine>>,
    output: W,
}

impl ConsoleTransport<io::Stdout> {
    /// Console on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl<W: Write> ConsoleTransport<W> {
    /// Spawn the reader thread for `input` and write to `output`.
    pub fn new<R>(input: R, output: W) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || read_lines(input, tx));

        Self { lines: rx, output }
    }

    /// Print the startup banner with the command list.
    pub fn print_banner(&mut self) -> io::Result<()> {
        writeln!(self.output, "Dual Stepper Motor Control Initialized.")?;
        writeln!(self.output, "Ready for commands:")?;
        writeln!(self.output, "{}", HELP_TEXT)?;
        self.output.flush()
    }

    /// Get the output writer.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Unwrap into the output writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<W: Write> LineTransport for ConsoleTransport<W> {
    type Error = io::Error;

    /// Returns `UnexpectedEof` once the input is exhausted.
    fn poll_line(&mut self, line: &mut LineBuffer) -> io::Result<Option<Received>> {
        let raw = match self.lines.try_recv() {
            Ok(raw) => raw?,
            Err(TryRecvError::Empty) => return Ok(None),
            Err(TryRecvError::Disconnected) => {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "console input closed"))
            }
        };

        let received = match raw {
            RawLine::Bytes(bytes) => {
                let received = load_bytes(line, &bytes);
                let text = String::from_utf8_lossy(&bytes);
                writeln!(self.output, "Received Command: {}", text.trim())?;
                received
            }
            RawLine::TooLong => {
                line.clear();
                writeln!(self.output, "Received Command: (over {} bytes)", MAX_LINE_LEN)?;
                Received::Overflow
            }
        };
        Ok(Some(received))
    }

    fn respond(&mut self, result: &CommandResult) -> io::Result<()> {
        writeln!(self.output, "{}", result.message())?;
        if result.code() == ResultCode::UnknownCommand {
            writeln!(self.output, "Available {}", HELP_TEXT)?;
        }
        writeln!(self.output, "Ready for next command.")?;
        self.output.flush()
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()
    }
}

/// Reader thread body: forward newline-terminated lines until EOF.
///
/// At most `MAX_LINE_LEN + 2` bytes of a line are buffered; the remainder of
/// a longer line is skipped. Only read errors and a closed channel end it.
fn read_lines<R: BufRead>(mut input: R, tx: Sender<io::Result<RawLine>>) {
    let limit = MAX_LINE_LEN as u64 + 2;
    loop {
        let mut bytes = Vec::new();
        let read = (&mut input).take(limit).read_until(b'\n', &mut bytes);
        let raw = match read {
            Ok(0) => return,
            Ok(n) if n as u64 == limit && !bytes.ends_with(b"\n") => {
                skip_line(&mut input).map(|()| RawLine::TooLong)
            }
            Ok(_) => Ok(RawLine::Bytes(bytes)),
            Err(e) => Err(e),
        };
        let failed = raw.is_err();
        if tx.send(raw).is_err() || failed {
            return;
        }
    }
}

/// Discard input up to and including the next newline.
fn skip_line<R: BufRead>(input: &mut R) -> io::Result<()> {
    loop {
        let (done, used) = {
            let buf = match input.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            match buf.iter().position(|&b| b == b'\n') {
                Some(i) => (true, i + 1),
                None => (buf.is_empty(), buf.len()),
            }
        };
        input.consume(used);
        if done {
            return Ok(());
        }
    }
}
