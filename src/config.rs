//! Configuration for the rrdcached client
//!
//! Centralized configuration with sensible defaults.

use std::fmt;
use std::path::PathBuf;

use crate::error::{Result, RrdError};
use crate::protocol::MAX_RESPONSE_SIZE;

/// Port the daemon listens on when a TCP address names no port
pub const DEFAULT_PORT: u16 = 42217;

/// Socket path the daemon binds when started without `-l`
pub const DEFAULT_SOCKET: &str = "/tmp/rrdcached.sock";

/// Environment variable holding the daemon address
pub const ADDRESS_ENV: &str = "RRDCACHED_ADDRESS";

/// Where the daemon listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Unix-domain socket path
    Unix(PathBuf),

    /// TCP endpoint
    Tcp { host: String, port: u16 },
}

impl Target {
    /// Parse a daemon address
    ///
    /// Accepted forms:
    /// - `unix:/path/to/socket` or any path containing `/` (`./rrdcached.sock`)
    /// - `host`, `host:port`
    /// - `[v6addr]`, `[v6addr]:port`, or a bare IPv6 address (no port)
    pub fn parse(address: &str) -> Result<Self> {
        let address = address.trim();
        if address.is_empty() {
            return Err(RrdError::Config("empty daemon address".to_string()));
        }

        if let Some(path) = address.strip_prefix("unix:") {
            if path.is_empty() {
                return Err(RrdError::Config("unix address without a path".to_string()));
            }
            return Ok(Target::Unix(PathBuf::from(path)));
        }
        // Absolute or relative filesystem path
        if address.contains('/') {
            return Ok(Target::Unix(PathBuf::from(address)));
        }

        // [v6addr] or [v6addr]:port
        if let Some(rest) = address.strip_prefix('[') {
            let (host, tail) = rest.split_once(']').ok_or_else(|| {
                RrdError::Config(format!("unterminated IPv6 address: {}", address))
            })?;
            let port = match tail {
                "" => DEFAULT_PORT,
                _ => match tail.strip_prefix(':') {
                    Some(port) => parse_port(port)?,
                    None => {
                        return Err(RrdError::Config(format!(
                            "unexpected text after IPv6 address: {}",
                            address
                        )))
                    }
                },
            };
            return Ok(Target::tcp(host, port));
        }

        match address.matches(':').count() {
            0 => Ok(Target::tcp(address, DEFAULT_PORT)),
            1 => {
                let (host, port) = address.split_once(':').unwrap_or((address, ""));
                if host.is_empty() {
                    return Err(RrdError::Config(format!("missing host in {}", address)));
                }
                Ok(Target::tcp(host, parse_port(port)?))
            }
            // Unbracketed IPv6 cannot carry a port
            _ => Ok(Target::tcp(address, DEFAULT_PORT)),
        }
    }

    /// Convenience constructor for a TCP target
    pub fn tcp(host: impl Into<String>, port: u16) -> Self {
        Target::Tcp {
            host: host.into(),
            port,
        }
    }

    /// Convenience constructor for a unix socket target
    pub fn unix(path: impl Into<PathBuf>) -> Self {
        Target::Unix(path.into())
    }
}

fn parse_port(port: &str) -> Result<u16> {
    port.parse::<u16>()
        .map_err(|_| RrdError::Config(format!("invalid port: {:?}", port)))
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Unix(path) => write!(f, "unix:{}", path.display()),
            Target::Tcp { host, port } if host.contains(':') => write!(f, "[{}]:{}", host, port),
            Target::Tcp { host, port } => write!(f, "{}:{}", host, port),
        }
    }
}

/// Main configuration for a client connection
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Target
    // -------------------------------------------------------------------------
    /// Daemon address (unix socket or TCP endpoint)
    pub target: Target,

    // -------------------------------------------------------------------------
    // Timeouts (0 = block forever)
    // -------------------------------------------------------------------------
    /// Read deadline per receive call (milliseconds)
    pub read_timeout_ms: u64,

    /// Write deadline per send call (milliseconds)
    pub write_timeout_ms: u64,

    /// TCP connect deadline (milliseconds). Ignored for unix sockets.
    pub connect_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Limits
    // -------------------------------------------------------------------------
    /// Largest response accepted before the stream is declared desynced
    pub max_response_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: Target::Unix(PathBuf::from(DEFAULT_SOCKET)),
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            connect_timeout_ms: 0,
            max_response_size: MAX_RESPONSE_SIZE,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Default config aimed at `target`
    pub fn new(target: Target) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Build a config from `RRDCACHED_ADDRESS`, falling back to the default socket
    pub fn from_env() -> Result<Self> {
        match std::env::var(ADDRESS_ENV) {
            Ok(address) => Ok(Self::new(Target::parse(&address)?)),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(RrdError::Config(format!("{}: {}", ADDRESS_ENV, e))),
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the daemon target
    pub fn target(mut self, target: Target) -> Self {
        self.config.target = target;
        self
    }

    /// Target a unix-domain socket
    pub fn unix_socket(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.target = Target::unix(path);
        self
    }

    /// Target a TCP endpoint
    pub fn tcp(mut self, host: impl Into<String>, port: u16) -> Self {
        self.config.target = Target::tcp(host, port);
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the TCP connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the maximum accepted response size (in bytes)
    pub fn max_response_size(mut self, size: usize) -> Self {
        self.config.max_response_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
