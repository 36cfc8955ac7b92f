//! Bounded linear history of document snapshots

use doc_model::Document;
use std::collections::VecDeque;

/// Maximum number of snapshots kept by default
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Ordered list of document snapshots with a cursor.
///
/// The entry under the cursor is the current document. Recording while the
/// cursor is not at the end drops every entry after it first.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Document>,
    index: usize,
    max_entries: usize,
}

impl History {
    /// Start a history whose first entry is `initial`
    pub fn new(initial: Document) -> Self {
        Self::with_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    /// Start a history with a custom cap (at least 1)
    pub fn with_limit(initial: Document, max_entries: usize) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(initial);
        Self {
            entries,
            index: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// Append a snapshot after the cursor, truncating any redo tail
    pub fn record(&mut self, snapshot: Document) {
        self.entries.truncate(self.index + 1);
        self.entries.push_back(snapshot);

        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
        self.index = self.entries.len() - 1;
    }

    /// Move the cursor back one entry and return the snapshot there
    pub fn step_back(&mut self) -> Option<&Document> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Move the cursor forward one entry and return the snapshot there
    pub fn step_forward(&mut self) -> Option<&Document> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn current(&self) -> Option<&Document> {
        self.entries.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn entries(&self) -> impl Iterator<Item = &Document> {
        self.entries.iter()
    }

    /// Drop all entries and restart from `initial`
    pub fn reset(&mut self, initial: Document) {
        self.entries.clear();
        self.entries.push_back(initial);
        self.index = 0;
    }
}
