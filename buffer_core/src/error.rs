//! Buffer error types

use thiserror::Error;

/// Errors reported by [`TextBuffer`](crate::TextBuffer) operations.
///
/// All of them are local to the failing call: the buffer is left exactly as
/// it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Invalid position or length: {pos}+{len} outside 0..{length}")]
    InvalidRange {
        pos: usize,
        len: usize,
        length: usize,
    },

    #[error("Invalid position: {pos} beyond length {length}")]
    InvalidPosition { pos: usize, length: usize },

    #[error("Cannot undo further")]
    NothingToUndo,

    #[error("Cannot redo further")]
    NothingToRedo,
}
