//! Value object trait: equality by value, not identity.
//!
//! Invoices are built almost entirely from value objects: line items, tax
//! breakdowns, GSTINs and party details have no identity of their own.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. A tax breakdown
/// computed twice from the same inputs is the same value, which is what lets
/// callers recompute on every edit instead of tracking incremental changes.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Rate(f64);
///
/// impl ValueObject for Rate {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
