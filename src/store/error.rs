use std::path::PathBuf;
use thiserror::Error;

use crate::core::types::MacroError;

/// Errors that can occur while loading or saving a macro save file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Save file missing or unreadable.
    #[error("unable to load macro file: {0}")]
    LoadFailed(PathBuf),
    /// Save destination unwritable.
    #[error("unable to save macro file: {0}")]
    SaveFailed(PathBuf),
    /// Save file has no parent directory to hold backups.
    #[error("backup directory not writable: {0}")]
    BackupDirNotWritable(PathBuf),
    /// A line is not in NAME,DEFINITION form.
    #[error("line {line} is not in NAME,DEFINITION form")]
    MalformedLine { line: usize },
    /// A line failed macro construction; the whole load is abandoned.
    #[error("line {line}: {source}")]
    InvalidMacro {
        line: usize,
        #[source]
        source: MacroError,
    },
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
