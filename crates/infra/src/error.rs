use std::path::PathBuf;

use thiserror::Error;

use fairsplit_core::DomainError;

pub type InfraResult<T> = Result<T, InfraError>;

/// Failures outside the pure domain: files, JSON, environment.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),

    /// A record in the document failed domain validation (0-based index).
    #[error("expense #{index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: DomainError,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl InfraError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
