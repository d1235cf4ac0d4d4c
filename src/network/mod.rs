//! Network Module
//!
//! Socket handling for the client side of the protocol.
//!
//! ## Architecture
//! - One blocking stream per transport (unix socket or TCP)
//! - Responses framed incrementally from 1 KB reads
//! - Every I/O failure surfaces as `RrdError::Connection`

mod transport;

pub use transport::{Stream, Transport};
