//! # Buffer Core
//!
//! A resizable byte buffer with positional editing and snapshot-based
//! undo/redo.
//!
//! ## Philosophy
//!
//! - **Copy, never share**: every snapshot and every restore is a full copy
//!   of the bytes; live storage and history never alias
//! - **Capacity is state**: snapshots record the allocated capacity, and a
//!   restore re-creates it, so growth thresholds replay identically
//! - **Explicit outcomes**: rejected positions come back as typed errors,
//!   never as silent corruption
//! - **No ambient authority**: no terminal, no file system; callers hand in
//!   raw bytes and take raw bytes back out
//!
//! ## Design
//!
//! The core provides:
//! - TextBuffer: live storage, length, capacity, clipboard and one history
//! - HistoryStore: undo and redo stacks of owned snapshots
//! - Snapshot: immutable copy of bytes, length and capacity
//! - BufferState: a read-only report for display and parity testing

pub mod buffer;
pub mod error;
pub mod history;
pub mod snapshot;
pub mod state;

pub use buffer::{TextBuffer, INITIAL_CAPACITY};
pub use error::BufferError;
pub use history::HistoryStore;
pub use snapshot::Snapshot;
pub use state::BufferState;
