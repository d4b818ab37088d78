//! Resizable text buffer with positional editing

use std::borrow::Cow;
use std::ops::Range;

use tracing::debug;

use crate::error::BufferError;
use crate::history::HistoryStore;
use crate::snapshot::Snapshot;
use crate::state::BufferState;

/// Capacity of a freshly created buffer
pub const INITIAL_CAPACITY: usize = 10;

/// Byte buffer with manual capacity growth, a clipboard and undo/redo.
///
/// Storage is a fixed-size allocation of `capacity` bytes; the first
/// `length` bytes are the logical content and a zero sentinel always
/// follows them, so `length < capacity` holds at all times.
///
/// Every mutating edit validates its arguments, records the pre-edit state
/// in the history (dropping the redo branch), then mutates.
#[derive(Debug)]
pub struct TextBuffer {
    storage: Box<[u8]>,
    length: usize,
    history: HistoryStore,
    clipboard: Vec<u8>,
}

impl TextBuffer {
    /// Create an empty buffer with [`INITIAL_CAPACITY`]
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Create an empty buffer; capacity is clamped to at least 1
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![0; capacity.max(1)].into_boxed_slice(),
            length: 0,
            history: HistoryStore::new(),
            clipboard: Vec::new(),
        }
    }

    // Read-only accessors

    /// The logical content, bytes `[0, length)`
    pub fn text(&self) -> &[u8] {
        &self.storage[..self.length]
    }

    /// The logical content as text, replacing invalid UTF-8
    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.text())
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn clipboard(&self) -> &[u8] {
        &self.clipboard
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Get a complete report of the buffer state
    pub fn state(&self) -> BufferState {
        BufferState {
            content: self.text().to_vec(),
            length: self.length,
            capacity: self.capacity(),
            clipboard: self.clipboard.clone(),
            undo_depth: self.history.undo_depth(),
            redo_depth: self.history.redo_depth(),
            undo_capacity: self.history.peek_undo().map(Snapshot::capacity),
            redo_capacity: self.history.peek_redo().map(Snapshot::capacity),
        }
    }

    // Editing

    /// Append bytes to the end, doubling capacity until they fit
    pub fn append(&mut self, text: impl AsRef<[u8]>) {
        let text = text.as_ref();
        self.record();

        let required = self.length + text.len();
        let mut capacity = self.capacity();
        while required >= capacity {
            capacity *= 2;
        }
        if capacity != self.capacity() {
            self.resize(capacity);
        }

        self.storage[self.length..required].copy_from_slice(text);
        self.set_length(required);
    }

    /// Replace `replace_len` bytes at `pos` with `substring`.
    ///
    /// `replace_len == 0` is a pure insertion. Requires `pos <= len()` and
    /// `pos + replace_len <= len()`.
    pub fn insert_and_replace(
        &mut self,
        pos: usize,
        substring: impl AsRef<[u8]>,
        replace_len: usize,
    ) -> Result<(), BufferError> {
        let substring = substring.as_ref();
        let end = pos.checked_add(replace_len);
        if pos > self.length || end.map_or(true, |end| end > self.length) {
            debug!(pos, replace_len, length = self.length, "rejected replace range");
            return Err(BufferError::InvalidRange {
                pos,
                len: replace_len,
                length: self.length,
            });
        }

        self.record();
        self.splice(pos, substring, replace_len);
        Ok(())
    }

    /// Remove `len` bytes starting at `pos`
    pub fn delete_text(&mut self, pos: usize, len: usize) -> Result<(), BufferError> {
        let range = self.checked_range(pos, len)?;
        self.record();
        self.remove(range);
        Ok(())
    }

    /// Move `len` bytes at `pos` into the clipboard.
    ///
    /// Records a single history entry.
    pub fn cut_text(&mut self, pos: usize, len: usize) -> Result<(), BufferError> {
        let range = self.checked_range(pos, len)?;
        self.record();
        self.clipboard = self.storage[range.clone()].to_vec();
        self.remove(range);
        Ok(())
    }

    /// Replace the clipboard with a copy of `len` bytes at `pos`
    pub fn copy_text(&mut self, pos: usize, len: usize) -> Result<(), BufferError> {
        let range = self.checked_range(pos, len)?;
        self.clipboard = self.storage[range].to_vec();
        Ok(())
    }

    /// Insert the clipboard contents at `pos`
    pub fn paste_text(&mut self, pos: usize) -> Result<(), BufferError> {
        if pos > self.length {
            debug!(pos, length = self.length, "rejected paste position");
            return Err(BufferError::InvalidPosition {
                pos,
                length: self.length,
            });
        }

        self.record();
        let clipboard = self.clipboard.clone();
        self.splice(pos, &clipboard, 0);
        Ok(())
    }

    // History

    /// Restore the state before the most recent edit
    pub fn undo(&mut self) -> Result<(), BufferError> {
        let snapshot = self.history.pop_undo().ok_or(BufferError::NothingToUndo)?;
        let capacity = self.storage.len();
        self.history.push_redo(&self.storage, self.length, capacity);
        self.restore(snapshot);
        Ok(())
    }

    /// Re-apply the most recently undone edit
    pub fn redo(&mut self) -> Result<(), BufferError> {
        let snapshot = self.history.pop_redo().ok_or(BufferError::NothingToRedo)?;
        let capacity = self.storage.len();
        self.history.push_undo(&self.storage, self.length, capacity);
        self.restore(snapshot);
        Ok(())
    }

    // Queries

    /// First offset where `needle` occurs in the content
    pub fn find_text(&self, needle: impl AsRef<[u8]>) -> Option<usize> {
        let needle = needle.as_ref();
        if needle.is_empty() {
            return Some(0);
        }
        self.text()
            .windows(needle.len())
            .position(|window| window == needle)
    }

    // External load/save collaborators

    /// Replace the whole content with `bytes`.
    ///
    /// Capacity becomes `bytes.len() + 1`. Not undoable: both history stacks
    /// are released. The clipboard is kept.
    pub fn load_raw(&mut self, bytes: impl AsRef<[u8]>) {
        let bytes = bytes.as_ref();
        let mut storage = vec![0; bytes.len() + 1].into_boxed_slice();
        storage[..bytes.len()].copy_from_slice(bytes);
        self.storage = storage;
        self.length = bytes.len();
        self.history.clear();
        debug!(length = self.length, "loaded raw content");
    }

    /// The logical content for the caller to persist
    pub fn save_raw(&self) -> &[u8] {
        self.text()
    }

    // Internals

    fn record(&mut self) {
        let capacity = self.storage.len();
        self.history.save(&self.storage, self.length, capacity);
    }

    fn checked_range(&self, pos: usize, len: usize) -> Result<Range<usize>, BufferError> {
        match pos.checked_add(len) {
            Some(end) if pos < self.length && end <= self.length => Ok(pos..end),
            _ => {
                debug!(pos, len, length = self.length, "rejected range");
                Err(BufferError::InvalidRange {
                    pos,
                    len,
                    length: self.length,
                })
            }
        }
    }

    /// Replace `replace_len` bytes at `pos`, growing to twice the new length
    /// when the sentinel would not fit. Bounds are already validated.
    fn splice(&mut self, pos: usize, replacement: &[u8], replace_len: usize) {
        let new_length = self.length + replacement.len() - replace_len;
        if new_length >= self.capacity() {
            self.resize(new_length * 2);
        }

        let tail = pos + replace_len..self.length;
        self.storage.copy_within(tail, pos + replacement.len());
        self.storage[pos..pos + replacement.len()].copy_from_slice(replacement);
        self.set_length(new_length);
    }

    fn remove(&mut self, range: Range<usize>) {
        let removed = range.len();
        self.storage.copy_within(range.end..self.length, range.start);
        self.set_length(self.length - removed);
    }

    fn resize(&mut self, capacity: usize) {
        let mut grown = vec![0; capacity].into_boxed_slice();
        let keep = self.length.min(capacity);
        grown[..keep].copy_from_slice(&self.storage[..keep]);
        debug!(from = self.storage.len(), to = capacity, "resized storage");
        self.storage = grown;
    }

    fn restore(&mut self, snapshot: Snapshot) {
        if snapshot.capacity() != self.capacity() {
            self.storage = vec![0; snapshot.capacity()].into_boxed_slice();
        }
        self.storage[..snapshot.len()].copy_from_slice(snapshot.bytes());
        self.set_length(snapshot.len());
        debug!(
            length = self.length,
            capacity = self.capacity(),
            "restored snapshot"
        );
    }

    fn set_length(&mut self, length: usize) {
        self.length = length;
        self.storage[length] = 0;
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}
