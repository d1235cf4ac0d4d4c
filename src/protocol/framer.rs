//! Response framer
//!
//! Decides when enough bytes have arrived to form one complete daemon
//! response. The header line starts with a status token; a positive
//! integer N there announces N further lines. Anything else (zero, a
//! negative status, garbage) makes the header line the whole response.
//!
//! Completeness is judged on newline-terminated lines only, so the result
//! never depends on where chunk boundaries fall.

use bytes::BytesMut;

use crate::error::{Result, RrdError};

/// Default cap on a single buffered response (16 MB)
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024 * 1024;

/// Byte length of the first complete frame in `buf`, if there is one
pub fn frame_length(buf: &[u8]) -> Option<usize> {
    let header_end = find_newline(buf)? + 1;

    let mut end = header_end;
    for _ in 0..additional_lines(&buf[..header_end - 1]) {
        end += find_newline(&buf[end..])? + 1;
    }
    Some(end)
}

/// Lines announced by a header line (without its newline)
///
/// Only a plain run of digits counts; a sign, a negative or a non-numeric
/// token announces nothing.
fn additional_lines(header: &[u8]) -> u64 {
    let token_end = header
        .iter()
        .position(|&b| b == b' ')
        .unwrap_or(header.len());
    std::str::from_utf8(&header[..token_end])
        .ok()
        .map(|token| token.trim_end_matches('\r'))
        .filter(|token| !token.starts_with('+'))
        .and_then(|token| token.parse::<u64>().ok())
        .unwrap_or(0)
}

fn find_newline(buf: &[u8]) -> Option<usize> {
    buf.iter().position(|&b| b == b'\n')
}

/// Accumulates raw bytes and yields complete responses
///
/// Scanning is incremental: bytes already searched for newlines are not
/// searched again on the next push.
#[derive(Debug)]
pub struct Framer {
    buf: BytesMut,
    max_size: usize,

    /// Bytes of `buf` already scanned, always just past a newline
    scanned: usize,

    /// Terminated lines found in `buf[..scanned]`
    lines: usize,

    /// Lines the pending frame needs, known once its header is complete
    needed: Option<usize>,
}

impl Default for Framer {
    fn default() -> Self {
        Self::new(MAX_RESPONSE_SIZE)
    }
}

impl Framer {
    /// Create a framer refusing responses larger than `max_size` bytes
    pub fn new(max_size: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(1024),
            max_size,
            scanned: 0,
            lines: 0,
            needed: None,
        }
    }

    /// Append bytes received from the stream
    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Take the next complete response, if one has fully arrived
    ///
    /// Re-evaluated after every push. Returns the response text including
    /// its final newline.
    pub fn next_frame(&mut self) -> Result<Option<String>> {
        while self.needed.map_or(true, |needed| self.lines < needed) {
            let Some(pos) = find_newline(&self.buf[self.scanned..]) else {
                if self.buf.len() > self.max_size {
                    return Err(RrdError::MalformedResponse(format!(
                        "response exceeds {} bytes without completing",
                        self.max_size
                    )));
                }
                return Ok(None);
            };

            let line_end = self.scanned + pos + 1;
            if self.needed.is_none() {
                let additional = additional_lines(&self.buf[..line_end - 1]);
                let additional = usize::try_from(additional).unwrap_or(usize::MAX);
                self.needed = Some(additional.saturating_add(1));
            }
            self.lines += 1;
            self.scanned = line_end;
        }

        let frame = self.buf.split_to(self.scanned);
        self.reset_scan();
        String::from_utf8(frame.to_vec())
            .map(Some)
            .map_err(|e| RrdError::MalformedResponse(format!("response is not UTF-8: {}", e)))
    }

    /// Number of bytes buffered but not yet returned as a frame
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Drop any buffered bytes
    pub fn clear(&mut self) {
        self.buf.clear();
        self.reset_scan();
    }

    fn reset_scan(&mut self) {
        self.scanned = 0;
        self.lines = 0;
        self.needed = None;
    }
}
