//! Immutable buffer snapshots for undo/redo

/// A saved copy of the buffer's bytes, length and capacity.
///
/// Snapshots are only created by [`HistoryStore`](crate::HistoryStore) and
/// are owned by exactly one stack at a time. Popping one transfers ownership
/// to the caller. Not `Clone`: a snapshot moves, it is never duplicated.
#[derive(Debug, PartialEq, Eq)]
pub struct Snapshot {
    bytes: Box<[u8]>,
    capacity: usize,
}

impl Snapshot {
    /// Copies the first `length` bytes of `bytes`, tagged with `capacity`.
    pub(crate) fn capture(bytes: &[u8], length: usize, capacity: usize) -> Self {
        Self {
            bytes: bytes[..length].into(),
            capacity,
        }
    }

    /// The saved logical content
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of content bytes saved
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Allocated capacity at the time of capture
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
