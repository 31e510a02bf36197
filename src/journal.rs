//! Append-only timestamped record stores.
//!
//! Journals back every log the subsystems keep: the shared error sink,
//! maintenance alerts, security threats, the comms message log, scenario
//! events and the flight recorder. Bounded journals keep only the most
//! recent entries; unbounded ones grow for the lifetime of the process.
//! Persistence is an external concern.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
    pub timestamp_ms: u64,
    pub message: String,
}

/// An append-only record store, internally synchronized so any task can
/// write through a shared reference.
#[derive(Debug)]
pub struct Journal {
    entries: Mutex<VecDeque<JournalEntry>>,
    capacity: Option<usize>,
}

impl Journal {
    pub fn unbounded() -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity: None,
        }
    }

    /// A journal that retains only the last `capacity` entries, dropping
    /// the oldest on overflow.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: Some(capacity),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<JournalEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn append(&self, message: impl Into<String>) {
        let entry = JournalEntry {
            timestamp_ms: now_ms(),
            message: message.into(),
        };
        let mut entries = self.lock();
        if let Some(capacity) = self.capacity {
            while entries.len() >= capacity {
                entries.pop_front();
            }
        }
        entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Snapshot of the current contents, oldest first.
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.lock().iter().cloned().collect()
    }

    pub fn last(&self) -> Option<JournalEntry> {
        self.lock().back().cloned()
    }
}

/// The shared journal sinks owned by the mission computer. Any task may
/// append; readers take snapshots through [`Journal::entries`]. The error
/// journal is the passive catch-all sink: no retry, no escalation, just
/// the append.
#[derive(Debug)]
pub struct Journals {
    pub errors: Journal,
    pub maintenance: Journal,
    pub threats: Journal,
    pub messages: Journal,
    pub scenarios: Journal,
    pub recorder: Journal,
}

impl Journals {
    pub fn new() -> Self {
        Self {
            errors: Journal::unbounded(),
            maintenance: Journal::unbounded(),
            threats: Journal::unbounded(),
            messages: Journal::unbounded(),
            scenarios: Journal::unbounded(),
            recorder: Journal::unbounded(),
        }
    }
}

impl Default for Journals {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_journal_keeps_everything() {
        let journal = Journal::unbounded();
        for i in 0..100 {
            journal.append(format!("entry {i}"));
        }
        assert_eq!(journal.len(), 100);
        assert_eq!(journal.entries()[0].message, "entry 0");
        assert_eq!(journal.last().unwrap().message, "entry 99");
    }

    #[test]
    fn bounded_journal_drops_oldest_entries() {
        let journal = Journal::bounded(10);
        for i in 0..25 {
            journal.append(format!("entry {i}"));
        }
        assert_eq!(journal.len(), 10);
        let entries = journal.entries();
        assert_eq!(entries[0].message, "entry 15");
        assert_eq!(entries[9].message, "entry 24");
    }

    #[test]
    fn entries_are_timestamped() {
        let journal = Journal::unbounded();
        let before = now_ms();
        journal.append("stamped");
        let entry = journal.last().unwrap();
        assert!(entry.timestamp_ms >= before);
    }

    #[test]
    fn empty_journal_reports_empty() {
        let journal = Journal::bounded(4);
        assert!(journal.is_empty());
        assert_eq!(journal.last(), None);
    }
}
