//! Bounded evaluation history.
//!
//! Every successful evaluation is recorded as an immutable entry. The
//! history is ordered most-recent-first and capped; recording past the
//! cap drops the oldest entries. The persisted form is a bare JSON
//! array of entries, so a record written by one engine instance decodes
//! in the next.

use serde::{Deserialize, Serialize};

/// Maximum number of entries retained.
pub const HISTORY_CAP: usize = 20;

/// Record of one successful evaluation.
///
/// Entries are immutable values: the expression as it stood when the
/// user pressed equals, the formatted result, and when it happened.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The buffer text that was evaluated
    pub expression: String,
    /// The formatted result it produced
    pub result: String,
    /// Unix epoch milliseconds at evaluation time
    pub timestamp: i64,
}

/// Ordered history of evaluations, most recent first.
///
/// `record` is pure: it returns a new history with the entry prepended
/// and the cap enforced, leaving the original untouched.
///
/// # Example
///
/// ```rust
/// use tallypad::history::{History, HistoryEntry};
///
/// let history = History::new();
/// let history = history.record(HistoryEntry {
///     expression: "1+2".to_string(),
///     result: "3".to_string(),
///     timestamp: 0,
/// });
/// let history = history.record(HistoryEntry {
///     expression: "7x8".to_string(),
///     result: "56".to_string(),
///     timestamp: 1,
/// });
///
/// assert_eq!(history.entries()[0].result, "56");
/// assert_eq!(history.entries()[1].result, "3");
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record an entry, returning a new history.
    ///
    /// The entry is prepended; anything beyond [`HISTORY_CAP`] is
    /// dropped from the old end.
    pub fn record(&self, entry: HistoryEntry) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.push(entry);
        entries.extend(self.entries.iter().cloned());
        entries.truncate(HISTORY_CAP);
        Self { entries }
    }

    /// All entries, most recent first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The most recent entry, if any.
    pub fn newest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode as the persisted JSON array form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode from the persisted JSON array form.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}
