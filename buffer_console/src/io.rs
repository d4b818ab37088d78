//! Document I/O operations

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Document I/O error
#[derive(Debug, Error)]
pub enum IoError {
    #[error("Document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IoError {
    fn from_io(path: &Path, source: std::io::Error) -> Self {
        match source.kind() {
            ErrorKind::NotFound => IoError::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => IoError::PermissionDenied(path.to_path_buf()),
            _ => IoError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Load/save collaborator for the buffer's raw content.
pub trait DocumentIo {
    fn load(&mut self, path: &Path) -> Result<Vec<u8>, IoError>;
    fn save(&mut self, path: &Path, content: &[u8]) -> Result<(), IoError>;
}

/// File-system backed document I/O.
///
/// Relative paths resolve against `root` when one is set, otherwise against
/// the process working directory.
#[derive(Debug, Clone, Default)]
pub struct FsDocumentIo {
    root: Option<PathBuf>,
}

impl FsDocumentIo {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl DocumentIo for FsDocumentIo {
    fn load(&mut self, path: &Path) -> Result<Vec<u8>, IoError> {
        let resolved = self.resolve(path);
        let content = fs::read(&resolved).map_err(|err| IoError::from_io(&resolved, err))?;
        debug!(path = %resolved.display(), bytes = content.len(), "loaded document");
        Ok(content)
    }

    fn save(&mut self, path: &Path, content: &[u8]) -> Result<(), IoError> {
        let resolved = self.resolve(path);
        fs::write(&resolved, content).map_err(|err| IoError::from_io(&resolved, err))?;
        debug!(path = %resolved.display(), bytes = content.len(), "saved document");
        Ok(())
    }
}
