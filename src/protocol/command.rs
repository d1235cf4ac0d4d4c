//! Command definitions
//!
//! Builds the single-line commands sent to the daemon. No escaping is
//! performed: filenames and values must not contain spaces or newlines.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Protocol verbs understood by the daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Create,
    Update,
    Pending,
    Forget,
    Flush,
    FlushAll,
    First,
    Last,
    Stats,
    Quit,
}

impl Verb {
    /// Keyword as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Create => "CREATE",
            Verb::Update => "UPDATE",
            Verb::Pending => "PENDING",
            Verb::Forget => "FORGET",
            Verb::Flush => "FLUSH",
            Verb::FlushAll => "FLUSHALL",
            Verb::First => "FIRST",
            Verb::Last => "LAST",
            Verb::Stats => "STATS",
            Verb::Quit => "QUIT",
        }
    }

    /// Whether the daemon answers this verb (QUIT closes without a reply)
    pub fn expects_response(&self) -> bool {
        !matches!(self, Verb::Quit)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for CREATE
///
/// `overwrite` keeps the daemon's polarity: `false` sends `-O`, which asks
/// the daemon NOT to overwrite an existing file; `true` omits the flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    /// Start time (`-b`), unset when `None`
    pub start: Option<u64>,

    /// Step in seconds (`-s`), unset when `None`
    pub step: Option<u64>,

    /// Allow replacing an existing file
    pub overwrite: bool,

    /// `DS:...` definitions, in order
    pub data_sources: Vec<String>,

    /// `RRA:...` definitions, in order
    pub archives: Vec<String>,
}

impl CreateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start timestamp
    pub fn start(mut self, start: u64) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the step
    pub fn step(mut self, step: u64) -> Self {
        self.step = Some(step);
        self
    }

    /// Set the overwrite flag (see type docs for the wire polarity)
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Append a data-source definition
    pub fn data_source(mut self, ds: impl Into<String>) -> Self {
        self.data_sources.push(ds.into());
        self
    }

    /// Append an archive definition
    pub fn archive(mut self, rra: impl Into<String>) -> Self {
        self.archives.push(rra.into());
        self
    }

    /// Positional arguments in wire order: start, step, overwrite, DS, RRA
    fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(5 + self.data_sources.len() + self.archives.len());
        if let Some(start) = self.start {
            args.push("-b".to_string());
            args.push(start.to_string());
        }
        if let Some(step) = self.step {
            args.push("-s".to_string());
            args.push(step.to_string());
        }
        if !self.overwrite {
            args.push("-O".to_string());
        }
        args.extend(self.data_sources.iter().cloned());
        args.extend(self.archives.iter().cloned());
        args
    }
}

/// A single request line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: Verb,
    pub filename: Option<String>,
    pub args: Vec<String>,
}

impl Command {
    fn new(verb: Verb, filename: Option<&str>, args: Vec<String>) -> Self {
        Self {
            verb,
            filename: filename.map(str::to_string),
            args,
        }
    }

    pub fn create(filename: &str, options: &CreateOptions) -> Self {
        Self::new(Verb::Create, Some(filename), options.to_args())
    }

    /// UPDATE with `timestamp:value[:value...]` strings
    pub fn update<S: AsRef<str>>(filename: &str, values: &[S]) -> Self {
        let args = values.iter().map(|v| v.as_ref().to_string()).collect();
        Self::new(Verb::Update, Some(filename), args)
    }

    pub fn pending(filename: &str) -> Self {
        Self::new(Verb::Pending, Some(filename), Vec::new())
    }

    pub fn forget(filename: &str) -> Self {
        Self::new(Verb::Forget, Some(filename), Vec::new())
    }

    pub fn flush(filename: &str) -> Self {
        Self::new(Verb::Flush, Some(filename), Vec::new())
    }

    pub fn flush_all() -> Self {
        Self::new(Verb::FlushAll, None, Vec::new())
    }

    /// FIRST for the archive at `rra_index`
    pub fn first(filename: &str, rra_index: usize) -> Self {
        Self::new(Verb::First, Some(filename), vec![rra_index.to_string()])
    }

    pub fn last(filename: &str) -> Self {
        Self::new(Verb::Last, Some(filename), Vec::new())
    }

    pub fn stats() -> Self {
        Self::new(Verb::Stats, None, Vec::new())
    }

    pub fn quit() -> Self {
        Self::new(Verb::Quit, None, Vec::new())
    }

    /// Encode to the wire line, terminated by exactly one newline
    pub fn encode(&self) -> String {
        let mut line = self.to_string();
        line.push('\n');
        line
    }
}

impl fmt::Display for Command {
    /// The command line without its terminating newline
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb.as_str())?;
        if let Some(filename) = &self.filename {
            write!(f, " {}", filename)?;
        }
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Current unix time in whole seconds, for building UPDATE values
///
/// Daemons older than 1.4.5 reject fractional timestamps.
pub fn now_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
        .to_string()
}
