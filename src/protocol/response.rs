//! Response definitions
//!
//! Parses a complete daemon response into status, message and raw text,
//! and maps daemon error messages onto the error taxonomy.

use crate::error::{Result, RrdError};

/// A parsed daemon response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// 0 = success, negative = error, positive N = N data lines follow
    pub status: i64,

    /// First-line text after the status code
    pub message: String,

    /// Full response text (header plus any data lines), trimmed
    pub raw: String,
}

impl Response {
    /// Parse a complete response
    ///
    /// Fails only when the status token is not a base-10 integer.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let header = raw.lines().next().unwrap_or("").trim_end_matches('\r');
        let (token, message) = header.split_once(' ').unwrap_or((header, ""));

        let status = token.parse::<i64>().map_err(|_| {
            RrdError::MalformedResponse(format!("invalid status token {:?} in {:?}", token, header))
        })?;

        Ok(Self {
            status,
            message: message.to_string(),
            raw: raw.to_string(),
        })
    }

    /// True for status >= 0
    pub fn is_success(&self) -> bool {
        self.status >= 0
    }

    /// The data lines following the header
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.raw.lines().skip(1).map(|line| line.trim_end_matches('\r'))
    }

    /// Turn a negative status into its classified error
    pub fn into_result(self) -> Result<Self> {
        if self.status < 0 {
            Err(classify_error(&self.message))
        } else {
            Ok(self)
        }
    }
}

/// Map a daemon error message to an error kind
///
/// All knowledge of the daemon's error wording lives here.
pub fn classify_error(message: &str) -> RrdError {
    let owned = message.to_string();
    if message.starts_with("Unknown command") {
        RrdError::UnknownCommand(owned)
    } else if message.starts_with("No such file") {
        RrdError::FileNotFound(owned)
    } else if message.contains("can't parse argument") {
        RrdError::UnrecognizedArgument {
            argument: extract_bad_argument(message),
            message: owned,
        }
    } else {
        RrdError::Protocol(owned)
    }
}

/// Pull `<token>` out of `... argument '<token>' ...`
fn extract_bad_argument(message: &str) -> Option<String> {
    const MARKER: &str = "argument '";
    let start = message.find(MARKER)? + MARKER.len();
    let rest = &message[start..];
    let end = rest.rfind('\'')?;
    match &rest[..end] {
        "" => None,
        argument => Some(argument.to_string()),
    }
}
