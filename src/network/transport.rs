//! Transport
//!
//! Owns the single byte stream to the daemon and performs raw writes and
//! framed reads.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
#[cfg(unix)]
use std::os::unix::net::UnixStream;
use std::time::Duration;

use crate::config::{Config, Target};
use crate::error::{Result, RrdError};
use crate::protocol::{read_response, write_command, Command, Framer, Response};

/// Duplex stream over either socket family
#[derive(Debug)]
pub enum Stream {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(UnixStream),
}

impl Stream {
    fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        match self {
            Stream::Tcp(s) => s.set_read_timeout(timeout),
            #[cfg(unix)]
            Stream::Unix(s) => s.set_read_timeout(timeout),
        }
    }

    fn set_write_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        match self {
            Stream::Tcp(s) => s.set_write_timeout(timeout),
            #[cfg(unix)]
            Stream::Unix(s) => s.set_write_timeout(timeout),
        }
    }

    fn shutdown(&self) -> io::Result<()> {
        match self {
            Stream::Tcp(s) => s.shutdown(Shutdown::Both),
            #[cfg(unix)]
            Stream::Unix(s) => s.shutdown(Shutdown::Both),
        }
    }
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Stream::Tcp(s) => s.read(buf),
            #[cfg(unix)]
            Stream::Unix(s) => s.read(buf),
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Stream::Tcp(s) => s.write(buf),
            #[cfg(unix)]
            Stream::Unix(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Stream::Tcp(s) => s.flush(),
            #[cfg(unix)]
            Stream::Unix(s) => s.flush(),
        }
    }
}

/// One open connection to the daemon
#[derive(Debug)]
pub struct Transport {
    /// Socket (the only live handle)
    stream: Stream,

    /// Accumulates response bytes across reads
    framer: Framer,

    /// Target description for logging
    peer: String,
}

impl Transport {
    /// Dial the configured target and apply timeouts
    pub fn open(config: &Config) -> Result<Self> {
        let peer = config.target.to_string();
        let stream = match &config.target {
            Target::Tcp { host, port } => {
                let stream = dial_tcp(host, *port, config.connect_timeout_ms)?;
                // Disable Nagle's algorithm, every request is one small line
                stream.set_nodelay(true)?;
                Stream::Tcp(stream)
            }
            #[cfg(unix)]
            Target::Unix(path) => Stream::Unix(UnixStream::connect(path)?),
            #[cfg(not(unix))]
            Target::Unix(_) => {
                return Err(RrdError::Config(
                    "unix sockets are not supported on this platform".to_string(),
                ))
            }
        };

        stream.set_read_timeout(millis(config.read_timeout_ms))?;
        stream.set_write_timeout(millis(config.write_timeout_ms))?;

        tracing::debug!("Connected to rrdcached at {}", peer);

        Ok(Self {
            stream,
            framer: Framer::new(config.max_response_size),
            peer,
        })
    }

    /// Write one command line
    pub fn send(&mut self, command: &Command) -> Result<()> {
        if self.framer.buffered() > 0 {
            tracing::warn!(
                "Discarding {} unsolicited bytes from {}",
                self.framer.buffered(),
                self.peer
            );
            self.framer.clear();
        }

        tracing::trace!("-> {}: {}", self.peer, command);
        write_command(&mut self.stream, command)
    }

    /// Read until the framer reports one complete response
    pub fn receive(&mut self) -> Result<Response> {
        let response = read_response(&mut self.stream, &mut self.framer)?;
        tracing::trace!("<- {}: {}", self.peer, response.raw);
        Ok(response)
    }

    /// Send a command and wait for its response
    pub fn round_trip(&mut self, command: &Command) -> Result<Response> {
        self.send(command)?;
        self.receive()
    }

    /// Close both directions of the socket
    ///
    /// The handle itself is released when the transport is dropped.
    pub fn shutdown(&self) -> Result<()> {
        match self.stream.shutdown() {
            Ok(()) => Ok(()),
            // Already closed by the daemon (e.g. after QUIT)
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(RrdError::Connection(e)),
        }
    }

    /// Target description
    pub fn peer(&self) -> &str {
        &self.peer
    }
}

fn dial_tcp(host: &str, port: u16, connect_timeout_ms: u64) -> io::Result<TcpStream> {
    let Some(timeout) = millis(connect_timeout_ms) else {
        return TcpStream::connect((host, port));
    };

    let mut last_err = None;
    for addr in (host, port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("{}:{} resolved to no addresses", host, port),
        )
    }))
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}
