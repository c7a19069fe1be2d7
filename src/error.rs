use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the record store and the repository built on it.
///
/// `Unavailable` is opaque transport/storage failure; the core never retries
/// writes on its own, so callers decide whether to retry or report.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record {0} not found")]
    NotFound(Uuid),
    #[error("record {0} already exists")]
    DuplicateId(Uuid),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn unavailable(err: impl std::fmt::Display) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}
