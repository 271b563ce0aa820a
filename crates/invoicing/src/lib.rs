//! Invoicing domain module: GST computation and invoice assembly.
//!
//! The tax engine (`compute_totals`) and the amount-in-words formatter
//! (`to_words`) are pure functions over their inputs: no IO, no storage, no
//! ambient state. Callers recompute on every edit.

pub mod invoice;
pub mod line_item;
pub mod party;
pub mod summary;
pub mod tax;
pub mod words;

pub use invoice::{GenerateInvoice, Invoice, PaymentStatus, ValidationErrors, default_due_date};
pub use line_item::{LineItem, coerce_number};
pub use party::{BusinessSettings, ClientDetails, DEFAULT_PAYMENT_TERMS_DAYS};
pub use summary::{MonthlyRevenue, RevenueSummary};
pub use tax::{
    CGST_RATE, IGST_RATE, SGST_RATE, TaxBreakdown, TaxRegime, compute_totals, format_inr,
    round_rupees,
};
pub use words::{rupees_in_words, to_words};
