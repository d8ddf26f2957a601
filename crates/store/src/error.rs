//! Store error model.

use std::path::PathBuf;

use thiserror::Error;

use ledgerly_core::DomainError;

/// Result type used across the store layer.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error: domain failures passed through, plus persistence
/// failures from the backing file.
///
/// Persistence failures are fatal to the operation and never retried;
/// storage is local, so they indicate an unrecoverable environment problem.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Validation or not-found failure from the domain layer.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The backing file could not be read or written.
    #[error("storage failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but does not parse as a collection.
    ///
    /// A corrupt file is surfaced, never silently reset; the prior on-disk
    /// state stays untouched.
    #[error("corrupt store file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A collection could not be encoded for persistence.
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is a domain validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Domain(DomainError::Validation(_)))
    }

    /// Whether this error is a domain not-found failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Domain(DomainError::NotFound(_)))
    }
}
