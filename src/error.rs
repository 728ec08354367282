use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, RenameError>;

/// Error type for the rename workflow.
///
/// Scan errors abort the whole run; the per-pair variants (`TargetExists`,
/// `RenameFailed`) are logged and the batch continues, surfacing through the
/// final summary instead.
#[derive(Debug, thiserror::Error)]
pub enum RenameError {
    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("cannot read directory {path}: {source}")]
    AccessDenied { path: PathBuf, source: io::Error },

    #[error("refusing to overwrite existing file '{target}' while renaming '{subtitle}'")]
    TargetExists { subtitle: String, target: String },

    #[error("failed to rename '{from}' to '{to}': {source}")]
    RenameFailed {
        from: String,
        to: String,
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
