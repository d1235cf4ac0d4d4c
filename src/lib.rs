//! # rrdcached client
//!
//! A synchronous client driver for rrdcached, the caching daemon in front
//! of round-robin database files:
//! - Unix-domain socket or TCP transport
//! - Incremental framing of multi-line responses
//! - Daemon errors classified into a typed taxonomy
//! - Structured STATS decoding
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Client                               │
//! │        (one connection, one request in flight)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command::encode
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Transport                              │
//! │                 (unix socket | TCP)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ raw chunks
//!                       ▼
//!                ┌─────────────┐
//!                │   Framer    │
//!                └──────┬──────┘
//!                       │ complete frame
//!          ┌────────────┴────────────┐
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Response   │          │    Stats    │
//!   │ (classify)  │          │  (decode)   │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use rrdcached::{Client, CreateOptions};
//!
//! # fn main() -> rrdcached::Result<()> {
//! let client = Client::connect_unix("/tmp/rrdcached.sock")?;
//! let options = CreateOptions::new()
//!     .step(10)
//!     .data_source("DS:temp:GAUGE:600:0:100")
//!     .archive("RRA:AVERAGE:0.5:1:1440");
//! client.create("temp.rrd", &options)?;
//! client.update("temp.rrd", &[format!("{}:21", rrdcached::protocol::now_timestamp())])?;
//! client.quit()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RrdError, Result};
pub use config::{Config, Target};
pub use client::Client;
pub use protocol::{CreateOptions, Response, StatCounter, Stats};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
