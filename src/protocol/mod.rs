//! Protocol Module
//!
//! Defines the line-oriented text protocol spoken by rrdcached.
//!
//! ## Protocol Format
//!
//! ### Request Format
//! ```text
//! <VERB> [filename] [args...]\n
//! ```
//!
//! ### Verbs
//! - CREATE   - filename, [-b start] [-s step] [-O] DS... RRA...
//! - UPDATE   - filename, timestamp:value[:value...]...
//! - PENDING / FORGET / FLUSH / LAST - filename
//! - FIRST    - filename, archive index
//! - FLUSHALL / STATS / QUIT - no arguments
//!
//! ### Response Format
//! ```text
//! ┌──────────┬─────────────────┬──────────────────────────┐
//! │ Status   │ Message         │ N further lines (N > 0)  │
//! └──────────┴─────────────────┴──────────────────────────┘
//! ```
//!
//! ### Status Codes
//! - 0:   success
//! - N>0: success, N data lines follow
//! - -1:  error, message classified into [`RrdError`](crate::RrdError)

mod command;
mod framer;
mod response;
mod stats;
mod codec;

pub use command::{now_timestamp, Command, CreateOptions, Verb};
pub use framer::{frame_length, Framer, MAX_RESPONSE_SIZE};
pub use response::{classify_error, Response};
pub use stats::{StatCounter, Stats};
pub use codec::{read_frame, read_response, write_command, READ_CHUNK_SIZE};
