//! `gstinvoice-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no storage).

pub mod error;
pub mod gstin;
pub mod id;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use gstin::{Gstin, is_valid_gstin};
pub use id::{DEFAULT_INVOICE_PREFIX, InvoiceNumber};
pub use value_object::ValueObject;
