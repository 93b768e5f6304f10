//! Bounded activity feed shown on the dashboard.

use std::collections::VecDeque;

/// Maximum number of entries kept in the feed.
const MAX_ENTRIES: usize = 10;

/// Severity of a feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational entry.
    Info,
    /// Successful operation.
    Success,
    /// Non-fatal problem.
    Warning,
    /// Error reported by the backend or transport.
    Danger,
}

impl Severity {
    /// Status label rendered next to the entry.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Danger => "ERROR",
            _ => "OK",
        }
    }
}

/// One row of the activity feed.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    /// Wall-clock time as `HH:MM:SS`.
    pub time: String,
    /// Event source label.
    pub event: String,
    /// Event detail text.
    pub detail: String,
    /// Entry severity.
    pub severity: Severity,
}

/// Newest-first activity log, capped at [`MAX_ENTRIES`].
///
/// A push whose detail matches the newest entry is suppressed, so a backend
/// error repeated on every poll tick produces a single row.
#[derive(Debug, Default)]
pub struct EventFeed {
    entries: VecDeque<FeedEntry>,
}

impl EventFeed {
    /// Creates an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes an entry, newest first.
    pub fn push(&mut self, event: impl Into<String>, detail: impl Into<String>, severity: Severity) {
        let detail = detail.into();
        if self
            .entries
            .front()
            .is_some_and(|entry| entry.detail == detail)
        {
            return;
        }

        self.entries.push_front(FeedEntry {
            time: chrono::Local::now().format("%H:%M:%S").to_string(),
            event: event.into(),
            detail,
            severity,
        });
        self.entries.truncate(MAX_ENTRIES);
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &FeedEntry> {
        self.entries.iter()
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the feed holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_entry_first() {
        let mut feed = EventFeed::new();
        feed.push("Sistema", "first", Severity::Info);
        feed.push("Sistema", "second", Severity::Info);

        let details: Vec<_> = feed.entries().map(|e| e.detail.as_str()).collect();
        assert_eq!(details, ["second", "first"]);
    }

    #[test]
    fn consecutive_duplicates_are_suppressed() {
        let mut feed = EventFeed::new();
        feed.push("Error", "connection refused", Severity::Danger);
        feed.push("Error", "connection refused", Severity::Danger);
        assert_eq!(feed.len(), 1);

        // A different entry in between re-enables the detail.
        feed.push("Sistema", "recovered", Severity::Info);
        feed.push("Error", "connection refused", Severity::Danger);
        assert_eq!(feed.len(), 3);
    }

    #[test]
    fn capped_at_ten_entries() {
        let mut feed = EventFeed::new();
        for i in 0..15 {
            feed.push("Sistema", format!("entry {i}"), Severity::Info);
        }
        assert_eq!(feed.len(), 10);
        assert_eq!(
            feed.entries().next().map(|e| e.detail.as_str()),
            Some("entry 14")
        );
    }

    #[test]
    fn severity_labels() {
        assert_eq!(Severity::Danger.label(), "ERROR");
        assert_eq!(Severity::Info.label(), "OK");
        assert_eq!(Severity::Success.label(), "OK");
    }
}
