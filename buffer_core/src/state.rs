//! Buffer state report for display and deterministic parity testing

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Complete observable buffer state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct BufferState {
    pub content: Vec<u8>,
    pub length: usize,
    pub capacity: usize,
    pub clipboard: Vec<u8>,
    pub undo_depth: usize,
    pub redo_depth: usize,
    /// Capacity an `undo` would restore, if any
    pub undo_capacity: Option<usize>,
    /// Capacity a `redo` would restore, if any
    pub redo_capacity: Option<usize>,
}

impl BufferState {
    /// Compute a deterministic hash of the state
    /// This is used for fast comparison in parity tests
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();

        hasher.update((self.content.len() as u64).to_le_bytes());
        hasher.update(&self.content);
        hasher.update((self.length as u64).to_le_bytes());
        hasher.update((self.capacity as u64).to_le_bytes());

        hasher.update((self.clipboard.len() as u64).to_le_bytes());
        hasher.update(&self.clipboard);

        hasher.update((self.undo_depth as u64).to_le_bytes());
        hasher.update((self.redo_depth as u64).to_le_bytes());
        for capacity in [self.undo_capacity, self.redo_capacity] {
            hasher.update(capacity.map_or(0, |c| c as u64 + 1).to_le_bytes());
        }

        let result = hasher.finalize();
        let bytes: [u8; 8] = result[..8].try_into().unwrap();
        u64::from_le_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(content: &[u8], capacity: usize) -> BufferState {
        BufferState {
            content: content.to_vec(),
            length: content.len(),
            capacity,
            clipboard: Vec::new(),
            undo_depth: 0,
            redo_depth: 0,
            undo_capacity: None,
            redo_capacity: None,
        }
    }

    #[test]
    fn test_state_hash_deterministic() {
        let state = state(b"hello", 10);
        assert_eq!(state.hash(), state.hash(), "Hash should be deterministic");
    }

    #[test]
    fn test_state_hash_sees_capacity() {
        assert_ne!(state(b"hello", 10).hash(), state(b"hello", 20).hash());
    }

    #[test]
    fn test_state_hash_separates_content_and_clipboard() {
        let mut a = state(b"ab", 10);
        a.clipboard = b"c".to_vec();
        let mut b = state(b"a", 10);
        b.length = 2;
        b.clipboard = b"bc".to_vec();
        assert_ne!(a.hash(), b.hash());
    }
}
