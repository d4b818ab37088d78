//! # Text Buffer Console
//!
//! The menu-driven front end for `buffer_core`.
//!
//! ## Philosophy
//!
//! - **Console owns I/O**: The core never prints and never touches files
//! - **One command, one core operation**: Every menu choice maps to exactly
//!   one buffer entry point
//! - **Injectable streams**: Sessions read any `BufRead` and write any
//!   `Write`, so scripted input drives the same code path as a terminal
//! - **Raw bytes on disk**: Files hold the logical content only, no header,
//!   no metadata, no escaping
//!
//! ## Responsibilities
//!
//! The console:
//! - Parses menu choices and their arguments
//! - Loads and saves documents through a `DocumentIo` collaborator
//! - Reads `ConsoleConfig` and sets up `tracing`
//!
//! ## Non-Responsibilities
//!
//! The console does NOT:
//! - Persist undo/redo history across runs
//! - Interpret the buffer content (no encodings, no line model)

pub mod commands;
pub mod config;
pub mod io;
pub mod logging;
pub mod session;

pub use commands::{CommandError, MenuCommand, MenuParser};
pub use config::{ConfigError, ConsoleConfig};
pub use io::{DocumentIo, FsDocumentIo, IoError};
pub use logging::LoggingError;
pub use session::{Flow, Session, SessionError};
