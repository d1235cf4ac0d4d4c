//! Protocol codec
//!
//! Stream helpers tying the encoder, framer and response parser to any
//! byte stream.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! <VERB> <args...>\n
//! ```
//!
//! ### Response
//! ```text
//! <status> <message>\n            status <= 0
//! <N> <message>\n<line>\n x N     status N > 0
//! ```

use std::io::{ErrorKind, Read, Write};

use super::{Command, Framer, Response};
use crate::error::{Result, RrdError};

/// Size of each read from the stream
pub const READ_CHUNK_SIZE: usize = 1024;

/// Write a command line to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    writer.write_all(command.encode().as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Read one complete response frame as text
///
/// Blocks until the framer reports completion. A peer close before that is
/// a connection failure, never a truncated response.
pub fn read_frame<R: Read>(reader: &mut R, framer: &mut Framer) -> Result<String> {
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    loop {
        if let Some(frame) = framer.next_frame()? {
            return Ok(frame);
        }

        let n = match reader.read(&mut chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(RrdError::Connection(e)),
        };
        if n == 0 {
            return Err(RrdError::Connection(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                format!(
                    "daemon closed the connection with {} bytes of an incomplete response buffered",
                    framer.buffered()
                ),
            )));
        }
        framer.push(&chunk[..n]);
    }
}

/// Read and parse one complete response
pub fn read_response<R: Read>(reader: &mut R, framer: &mut Framer) -> Result<Response> {
    let frame = read_frame(reader, framer)?;
    Response::parse(&frame)
}
