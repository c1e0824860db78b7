//! Errors that abort an audit before any finding is produced.

use std::path::PathBuf;

/// Fatal lockfile errors.
///
/// Findings are never reported through this type; they travel inside
/// [`CheckResult`](crate::model::CheckResult).
#[derive(Debug, thiserror::Error)]
pub enum LockfileError {
    /// The document parsed, but is not a recognizable lockfile shape.
    #[error("malformed lockfile: {0}")]
    Malformed(String),

    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The lockfile could not be read from disk.
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LockfileError>;
