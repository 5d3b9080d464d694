//! Connection-per-command TCP transport (std only).
//!
//! Each accepted connection carries one command line and receives exactly
//! one `"status", "message"` line before it is closed.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::command::CommandResult;
use crate::config::TransportConfig;

use super::{load_bytes, LineBuffer, LineTransport, Received, MAX_LINE_LEN};

/// TCP listener transport.
pub struct TcpTransport {
    listener: TcpListener,
    read_timeout: Duration,
    pending: Option<TcpStream>,
}

impl TcpTransport {
    /// Bind a non-blocking listener.
    pub fn bind<A: ToSocketAddrs>(addr: A, read_timeout: Duration) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        Ok(Self {
            listener,
            read_timeout,
            pending: None,
        })
    }

    /// Bind using the transport settings of the configuration file.
    pub fn from_config(config: &TransportConfig) -> io::Result<Self> {
        Self::bind(
            config.tcp_bind.as_str(),
            Duration::from_millis(u64::from(config.read_timeout_ms)),
        )
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    fn read_request(&self, stream: &TcpStream, line: &mut LineBuffer) -> io::Result<Option<Received>> {
        stream.set_nonblocking(false)?;
        stream.set_read_timeout(Some(self.read_timeout))?;

        // Room for the longest line plus "\r\n"; anything longer overflows.
        let limit = MAX_LINE_LEN as u64 + 2;
        let mut reader = BufReader::new(stream.take(limit));
        let mut raw = Vec::new();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        Ok(Some(load_bytes(line, &raw)))
    }
}

impl LineTransport for TcpTransport {
    type Error = io::Error;

    fn poll_line(&mut self, line: &mut LineBuffer) -> io::Result<Option<Received>> {
        // A connection left without a response is dropped.
        self.pending = None;

        let stream = match self.listener.accept() {
            Ok((stream, _)) => stream,
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(None),
            Err(e) => return Err(e),
        };
        debug!("Client connected");

        match self.read_request(&stream, line) {
            Ok(Some(received)) => {
                self.pending = Some(stream);
                Ok(Some(received))
            }
            Ok(None) => {
                debug!("Client closed without a command");
                Ok(None)
            }
            Err(_) => {
                warn!("Dropping client: no readable command line");
                Ok(None)
            }
        }
    }

    /// Per-connection write failures are logged, not returned.
    fn respond(&mut self, result: &CommandResult) -> io::Result<()> {
        let Some(mut stream) = self.pending.take() else {
            return Ok(());
        };
        if writeln!(stream, "{}", result).and_then(|_| stream.flush()).is_err() {
            warn!("Client went away before the response was sent");
        }
        let _ = stream.shutdown(Shutdown::Both);
        debug!("Client disconnected");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ResultCode;
    use std::thread;
    use std::time::Instant;

    fn accept_line(transport: &mut TcpTransport, line: &mut LineBuffer) -> Received {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(received) = transport.poll_line(line).unwrap() {
                return received;
            }
            assert!(Instant::now() < deadline, "no connection");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_one_framed_line_then_close() {
        let mut transport = TcpTransport::bind("127.0.0.1:0", Duration::from_secs(2)).unwrap();
        let addr = transport.local_addr().unwrap();

        let client = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream.write_all(b"GETPOS\n").unwrap();
            let mut reply = String::new();
            stream.read_to_string(&mut reply).unwrap();
            reply
        });

        let mut line = LineBuffer::new();
        assert_eq!(accept_line(&mut transport, &mut line), Received::Line);
        assert_eq!(line.as_str(), "GETPOS");

        let result = CommandResult::new(
            ResultCode::Ok,
            format_args!("Current Position - A: {} steps, B: {} steps.", 0, 0),
        );
        transport.respond(&result).unwrap();

        let reply = client.join().unwrap();
        assert_eq!(
            reply,
            "\"success\", \"Current Position - A: 0 steps, B: 0 steps.\"\n"
        );
    }

    #[test]
    fn test_bad_utf8_gets_an_error_reply() {
        let mut transport = TcpTransport::bind("127.0.0.1:0", Duration::from_secs(2)).unwrap();
        let addr = transport.local_addr().unwrap();

        let client = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream.write_all(b"\xff\xfe\n").unwrap();
            let mut reply = String::new();
            stream.read_to_string(&mut reply).unwrap();
            reply
        });

        let mut line = LineBuffer::new();
        assert_eq!(accept_line(&mut transport, &mut line), Received::Invalid);
        assert!(line.is_empty());

        transport
            .respond(&CommandResult::from(crate::error::CommandError::InvalidEncoding))
            .unwrap();
        assert_eq!(
            client.join().unwrap(),
            "\"error\", \"Command line is not valid text.\"\n"
        );
    }

    #[test]
    fn test_idle_listener_returns_none() {
        let mut transport = TcpTransport::bind("127.0.0.1:0", Duration::from_millis(100)).unwrap();
        let mut line = LineBuffer::new();
        assert_eq!(transport.poll_line(&mut line).unwrap(), None);
    }
}
