//! `gstinvoice-store` — typed persistence for invoices and their companions.
//!
//! Records are JSON documents in any [`KeyValueStore`]. [`InvoiceBook`]
//! gives each record kind its own accessors so callers never scan key
//! prefixes themselves.

pub mod book;
pub mod error;
pub mod kv;
pub mod record;

pub use book::{DraftPolicy, DraftSave, InvoiceBook, generate_and_store};
pub use error::{StoreError, StoreResult};
pub use kv::{InMemoryKeyValueStore, KeyValueStore};
pub use record::{
    ClientTemplate, Draft, Record, RecordKey, RecordKind, SavedItem, template_slug,
};
