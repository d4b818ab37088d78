//! Undo/redo history store

use tracing::{debug, trace};

use crate::snapshot::Snapshot;

/// Two LIFO stacks of owned snapshots.
///
/// The store knows nothing about buffer semantics beyond raw bytes, length
/// and capacity. Depth is unbounded.
#[derive(Debug, Default)]
pub struct HistoryStore {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Record the state before a fresh edit.
    ///
    /// Pushes onto the undo stack and drops the whole redo branch.
    pub fn save(&mut self, bytes: &[u8], length: usize, capacity: usize) {
        self.undo.push(Snapshot::capture(bytes, length, capacity));
        if !self.redo.is_empty() {
            debug!(discarded = self.redo.len(), "redo branch cleared");
            self.redo.clear();
        }
        trace!(undo_depth = self.undo.len(), length, capacity, "saved");
    }

    /// Push onto the undo stack without touching redo
    pub fn push_undo(&mut self, bytes: &[u8], length: usize, capacity: usize) {
        self.undo.push(Snapshot::capture(bytes, length, capacity));
        trace!(undo_depth = self.undo.len(), "pushed undo");
    }

    /// Push onto the redo stack without touching undo
    pub fn push_redo(&mut self, bytes: &[u8], length: usize, capacity: usize) {
        self.redo.push(Snapshot::capture(bytes, length, capacity));
        trace!(redo_depth = self.redo.len(), "pushed redo");
    }

    pub fn pop_undo(&mut self) -> Option<Snapshot> {
        self.undo.pop()
    }

    pub fn pop_redo(&mut self) -> Option<Snapshot> {
        self.redo.pop()
    }

    /// Borrow the most recent undo snapshot without popping it
    pub fn peek_undo(&self) -> Option<&Snapshot> {
        self.undo.last()
    }

    /// Borrow the most recent redo snapshot without popping it
    pub fn peek_redo(&self) -> Option<&Snapshot> {
        self.redo.last()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Release every snapshot in both stacks
    pub fn clear(&mut self) {
        debug!(
            undo_depth = self.undo.len(),
            redo_depth = self.redo.len(),
            "history cleared"
        );
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let mut history = HistoryStore::new();
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 0);
        assert!(history.pop_undo().is_none());
        assert!(history.pop_redo().is_none());
    }

    #[test]
    fn test_undo_stack_is_lifo() {
        let mut history = HistoryStore::new();
        history.save(b"a", 1, 10);
        history.save(b"ab", 2, 10);
        history.save(b"abc", 3, 10);

        assert_eq!(history.pop_undo().unwrap().bytes(), b"abc");
        assert_eq!(history.pop_undo().unwrap().bytes(), b"ab");
        assert_eq!(history.pop_undo().unwrap().bytes(), b"a");
        assert!(history.pop_undo().is_none());
    }

    #[test]
    fn test_save_clears_redo() {
        let mut history = HistoryStore::new();
        history.push_redo(b"one", 3, 10);
        history.push_redo(b"two", 3, 10);
        assert_eq!(history.redo_depth(), 2);

        history.save(b"three", 5, 10);
        assert_eq!(history.redo_depth(), 0);
        assert_eq!(history.undo_depth(), 1);
        assert!(history.pop_redo().is_none());
    }

    #[test]
    fn test_push_undo_keeps_redo() {
        let mut history = HistoryStore::new();
        history.push_redo(b"x", 1, 10);
        history.push_undo(b"y", 1, 10);
        assert_eq!(history.undo_depth(), 1);
        assert_eq!(history.redo_depth(), 1);
    }

    #[test]
    fn test_push_redo_keeps_undo() {
        let mut history = HistoryStore::new();
        history.save(b"x", 1, 10);
        history.push_redo(b"y", 1, 10);
        assert_eq!(history.undo_depth(), 1);
        assert_eq!(history.peek_redo().unwrap().bytes(), b"y");
    }

    #[test]
    fn test_save_copies_only_length_bytes() {
        let mut history = HistoryStore::new();
        history.save(b"hello world", 5, 20);
        let snapshot = history.peek_undo().unwrap();
        assert_eq!(snapshot.bytes(), b"hello");
        assert_eq!(snapshot.capacity(), 20);
    }

    #[test]
    fn test_clear_releases_both_stacks() {
        let mut history = HistoryStore::new();
        history.save(b"a", 1, 10);
        history.push_redo(b"b", 1, 10);
        history.clear();
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 0);
    }
}
