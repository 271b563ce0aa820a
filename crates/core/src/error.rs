//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only the layers around the tax engine produce these (validation before
/// invoice generation, record lookups). The engine itself is total.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a required field was blank).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A GSTIN did not match the registration number format.
    #[error("invalid GSTIN: {0}")]
    InvalidGstin(String),

    /// An invoice number could not be parsed as `<prefix>-<sequence>`.
    #[error("invalid invoice number: {0}")]
    InvalidInvoiceNumber(String),

    /// A requested record was not found.
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. sequence counter moved backwards).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_gstin(msg: impl Into<String>) -> Self {
        Self::InvalidGstin(msg.into())
    }

    pub fn invalid_invoice_number(msg: impl Into<String>) -> Self {
        Self::InvalidInvoiceNumber(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
