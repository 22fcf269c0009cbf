//! Error types for buildstamp-core

use std::io;
use std::path::PathBuf;

/// Every way a stamping run can fail. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum StampError {
    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("toolchain `{program}` unavailable: {reason}")]
    ToolchainUnavailable { program: String, reason: String },
}

impl StampError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StampError::FileAccess {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StampError>;
