//! Store error model.

use gstinvoice_core::DomainError;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing key/value store failed (e.g. a poisoned lock).
    #[error("store backend error: {0}")]
    Backend(String),

    /// A storage key did not match any known record kind.
    #[error("unknown storage key: {0}")]
    UnknownKey(String),

    /// The request was rejected by domain rules before anything was written.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
