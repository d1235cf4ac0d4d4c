//! Statistics report
//!
//! Decodes the STATS reply:
//!
//! ```text
//! 10 Statistics follow
//! QueueLength: 0
//! UpdatesReceived: 12
//! ...
//! ```

/// Counters reported by STATS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCounter {
    QueueLength,
    CreatesReceived,
    UpdatesReceived,
    FlushesReceived,
    UpdatesWritten,
    DataSetsWritten,
    TreeNodesNumber,
    TreeDepth,
    JournalBytes,
    JournalRotate,
}

impl StatCounter {
    pub const ALL: [StatCounter; 10] = [
        StatCounter::QueueLength,
        StatCounter::CreatesReceived,
        StatCounter::UpdatesReceived,
        StatCounter::FlushesReceived,
        StatCounter::UpdatesWritten,
        StatCounter::DataSetsWritten,
        StatCounter::TreeNodesNumber,
        StatCounter::TreeDepth,
        StatCounter::JournalBytes,
        StatCounter::JournalRotate,
    ];

    /// Label as printed by the daemon
    pub fn label(&self) -> &'static str {
        match self {
            StatCounter::QueueLength => "QueueLength",
            StatCounter::CreatesReceived => "CreatesReceived",
            StatCounter::UpdatesReceived => "UpdatesReceived",
            StatCounter::FlushesReceived => "FlushesReceived",
            StatCounter::UpdatesWritten => "UpdatesWritten",
            StatCounter::DataSetsWritten => "DataSetsWritten",
            StatCounter::TreeNodesNumber => "TreeNodesNumber",
            StatCounter::TreeDepth => "TreeDepth",
            StatCounter::JournalBytes => "JournalBytes",
            StatCounter::JournalRotate => "JournalRotate",
        }
    }

    /// Exact, case-sensitive label lookup
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "QueueLength" => Some(StatCounter::QueueLength),
            "CreatesReceived" => Some(StatCounter::CreatesReceived),
            "UpdatesReceived" => Some(StatCounter::UpdatesReceived),
            "FlushesReceived" => Some(StatCounter::FlushesReceived),
            "UpdatesWritten" => Some(StatCounter::UpdatesWritten),
            "DataSetsWritten" => Some(StatCounter::DataSetsWritten),
            "TreeNodesNumber" => Some(StatCounter::TreeNodesNumber),
            "TreeDepth" => Some(StatCounter::TreeDepth),
            "JournalBytes" => Some(StatCounter::JournalBytes),
            "JournalRotate" => Some(StatCounter::JournalRotate),
            _ => None,
        }
    }
}

/// Counter snapshot; labels the daemon did not report stay zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub queue_length: u64,
    pub creates_received: u64,
    pub updates_received: u64,
    pub flushes_received: u64,
    pub updates_written: u64,
    pub data_sets_written: u64,
    pub tree_nodes_number: u64,
    pub tree_depth: u64,
    pub journal_bytes: u64,
    pub journal_rotate: u64,
}

impl Stats {
    /// Decode a STATS response
    ///
    /// Reads as many `Label: value` lines as the header announces (or as
    /// are present, if fewer). Unknown labels and unparseable values are
    /// skipped.
    pub fn decode(raw: &str) -> Self {
        let mut stats = Stats::default();
        let mut lines = raw.lines();

        let count = lines
            .next()
            .and_then(|header| header.split(' ').next())
            .and_then(|token| token.parse::<usize>().ok())
            .unwrap_or(0);

        for line in lines.take(count) {
            let line = line.trim_end_matches('\r');
            let Some((label, value)) = line.split_once(": ") else {
                tracing::trace!("Skipping stats line without separator: {:?}", line);
                continue;
            };
            let Ok(value) = value.trim().parse::<u64>() else {
                tracing::trace!("Skipping stats line with bad value: {:?}", line);
                continue;
            };
            match StatCounter::from_label(label) {
                Some(counter) => stats.set(counter, value),
                None => tracing::trace!("Ignoring unknown stats label {:?}", label),
            }
        }

        stats
    }

    pub fn get(&self, counter: StatCounter) -> u64 {
        match counter {
            StatCounter::QueueLength => self.queue_length,
            StatCounter::CreatesReceived => self.creates_received,
            StatCounter::UpdatesReceived => self.updates_received,
            StatCounter::FlushesReceived => self.flushes_received,
            StatCounter::UpdatesWritten => self.updates_written,
            StatCounter::DataSetsWritten => self.data_sets_written,
            StatCounter::TreeNodesNumber => self.tree_nodes_number,
            StatCounter::TreeDepth => self.tree_depth,
            StatCounter::JournalBytes => self.journal_bytes,
            StatCounter::JournalRotate => self.journal_rotate,
        }
    }

    pub fn set(&mut self, counter: StatCounter, value: u64) {
        let slot = match counter {
            StatCounter::QueueLength => &mut self.queue_length,
            StatCounter::CreatesReceived => &mut self.creates_received,
            StatCounter::UpdatesReceived => &mut self.updates_received,
            StatCounter::FlushesReceived => &mut self.flushes_received,
            StatCounter::UpdatesWritten => &mut self.updates_written,
            StatCounter::DataSetsWritten => &mut self.data_sets_written,
            StatCounter::TreeNodesNumber => &mut self.tree_nodes_number,
            StatCounter::TreeDepth => &mut self.tree_depth,
            StatCounter::JournalBytes => &mut self.journal_bytes,
            StatCounter::JournalRotate => &mut self.journal_rotate,
        };
        *slot = value;
    }

    /// All counters with their labels, in report order
    pub fn iter(&self) -> impl Iterator<Item = (StatCounter, u64)> + '_ {
        StatCounter::ALL
            .into_iter()
            .map(move |counter| (counter, self.get(counter)))
    }

    /// Per-counter growth since `earlier` (saturating at zero)
    pub fn delta(&self, earlier: &Stats) -> Stats {
        let mut delta = Stats::default();
        for counter in StatCounter::ALL {
            delta.set(counter, self.get(counter).saturating_sub(earlier.get(counter)));
        }
        delta
    }
}
