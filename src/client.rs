//! Client Module
//!
//! The driver tying encoder, transport and classifier together.
//!
//! ## Concurrency Model: one request in flight
//!
//! The protocol carries no request identifiers, so a response can only be
//! attributed to the command sent right before it. Each call holds
//! `transport` for the whole send+receive, which makes a `Client` safe to
//! share between threads (`&self` methods) while keeping commands strictly
//! serialized. Independent `Client`s each own their own socket.

use std::io;
use std::path::PathBuf;

use parking_lot::Mutex;

use crate::config::{Config, Target};
use crate::error::{Result, RrdError};
use crate::network::Transport;
use crate::protocol::{Command, CreateOptions, Response, Stats};

/// Synchronous rrdcached client owning one connection
pub struct Client {
    /// Configuration used to (re)connect
    config: Config,

    /// Open transport; `None` after QUIT, close, or a connection failure
    transport: Mutex<Option<Transport>>,
}

impl Client {
    /// Connect using the given config
    pub fn connect(config: Config) -> Result<Self> {
        let transport = Transport::open(&config)?;
        Ok(Self {
            config,
            transport: Mutex::new(Some(transport)),
        })
    }

    /// Connect to a unix-domain socket with default settings
    pub fn connect_unix(path: impl Into<PathBuf>) -> Result<Self> {
        Self::connect(Config::new(Target::unix(path)))
    }

    /// Connect to a TCP endpoint with default settings
    pub fn connect_tcp(host: impl Into<String>, port: u16) -> Result<Self> {
        Self::connect(Config::new(Target::tcp(host, port)))
    }

    /// Send a command and return its classified response
    ///
    /// A connection failure or a malformed response leaves the stream in an
    /// unknown state, so the transport is dropped; later calls fail with a
    /// connection error until [`Client::reconnect`] succeeds.
    pub fn execute(&self, command: &Command) -> Result<Response> {
        // QUIT gets no reply; waiting for one would block forever
        if !command.verb.expects_response() {
            self.quit()?;
            return Ok(Response {
                status: 0,
                message: String::new(),
                raw: String::new(),
            });
        }

        let mut guard = self.transport.lock();
        let transport = guard.as_mut().ok_or_else(not_connected)?;

        match transport.round_trip(command) {
            Ok(response) => {
                if response.status < 0 {
                    tracing::debug!("{} failed: {}", command.verb, response.message);
                }
                response.into_result()
            }
            Err(e) => {
                if e.is_connection() || matches!(e, RrdError::MalformedResponse(_)) {
                    tracing::warn!(
                        "Dropping connection to {} after {}: {}",
                        transport.peer(),
                        command.verb,
                        e
                    );
                    *guard = None;
                }
                Err(e)
            }
        }
    }

    // =========================================================================
    // Verbs
    // =========================================================================

    /// CREATE a round-robin file
    pub fn create(&self, filename: &str, options: &CreateOptions) -> Result<Response> {
        self.execute(&Command::create(filename, options))
    }

    /// UPDATE with `timestamp:value[:value...]` strings
    ///
    /// Success reads `0 errors, enqueued N value(s).`
    pub fn update<S: AsRef<str>>(&self, filename: &str, values: &[S]) -> Result<Response> {
        self.execute(&Command::update(filename, values))
    }

    /// PENDING updates for a file; status is the pending count, one per line
    pub fn pending(&self, filename: &str) -> Result<Response> {
        self.execute(&Command::pending(filename))
    }

    /// FORGET pending updates without writing them
    pub fn forget(&self, filename: &str) -> Result<Response> {
        self.execute(&Command::forget(filename))
    }

    /// FLUSH one file to disk
    pub fn flush(&self, filename: &str) -> Result<Response> {
        self.execute(&Command::flush(filename))
    }

    /// FLUSHALL files
    pub fn flush_all(&self) -> Result<Response> {
        self.execute(&Command::flush_all())
    }

    /// FIRST timestamp of archive `rra_index`
    pub fn first(&self, filename: &str, rra_index: usize) -> Result<Response> {
        self.execute(&Command::first(filename, rra_index))
    }

    /// LAST update timestamp
    pub fn last(&self, filename: &str) -> Result<Response> {
        self.execute(&Command::last(filename))
    }

    /// STATS, decoded into counters
    pub fn stats(&self) -> Result<Stats> {
        let response = self.execute(&Command::stats())?;
        Ok(Stats::decode(&response.raw))
    }

    /// QUIT and release the socket
    ///
    /// The daemon closes without replying. The socket is released even when
    /// the write fails. A no-op when already disconnected.
    pub fn quit(&self) -> Result<()> {
        let Some(mut transport) = self.transport.lock().take() else {
            return Ok(());
        };
        let sent = transport.send(&Command::quit());
        let closed = transport.shutdown();
        tracing::debug!("Disconnected from {}", transport.peer());
        sent.and(closed)
    }

    // =========================================================================
    // Connection Lifecycle
    // =========================================================================

    /// Drop the current connection (if any) and dial again
    pub fn reconnect(&self) -> Result<()> {
        let mut guard = self.transport.lock();
        if let Some(old) = guard.take() {
            if let Err(e) = old.shutdown() {
                tracing::debug!("Ignoring close error from {}: {}", old.peer(), e);
            }
        }
        *guard = Some(Transport::open(&self.config)?);
        Ok(())
    }

    /// Close the socket without sending QUIT
    pub fn close(&self) -> Result<()> {
        match self.transport.lock().take() {
            Some(transport) => transport.shutdown(),
            None => Ok(()),
        }
    }

    /// Whether a transport is currently open
    pub fn is_connected(&self) -> bool {
        self.transport.lock().is_some()
    }

    /// Get the config
    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn not_connected() -> RrdError {
    RrdError::Connection(io::Error::new(
        io::ErrorKind::NotConnected,
        "rrdcached is not connected",
    ))
}
