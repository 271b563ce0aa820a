//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Prefix used when business settings don't configure one.
pub const DEFAULT_INVOICE_PREFIX: &str = "INV";

/// Human-facing invoice number, e.g. `INV-007`.
///
/// The sequence is zero-padded to at least three digits; larger sequences
/// simply grow (`INV-1234`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    /// Format `prefix` and `sequence` as `{prefix}-{sequence:03}`.
    ///
    /// A blank prefix falls back to [`DEFAULT_INVOICE_PREFIX`].
    pub fn format(prefix: &str, sequence: u64) -> Self {
        let prefix = prefix.trim();
        let prefix = if prefix.is_empty() {
            DEFAULT_INVOICE_PREFIX
        } else {
            prefix
        };
        Self(format!("{prefix}-{sequence:03}"))
    }

    /// Wrap an existing number verbatim (e.g. one the user typed).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into `(prefix, sequence)` if the number follows the generated
    /// `<prefix>-<digits>` shape.
    pub fn parts(&self) -> Option<(&str, u64)> {
        let (prefix, digits) = self.0.rsplit_once('-')?;
        if prefix.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(|seq| (prefix, seq))
    }
}

impl core::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for InvoiceNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::invalid_invoice_number("empty"));
        }
        let number = Self(s.to_string());
        if number.parts().is_none() {
            return Err(DomainError::invalid_invoice_number(format!(
                "{s}: expected <prefix>-<digits>"
            )));
        }
        Ok(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_pads_sequence_to_three_digits() {
        assert_eq!(InvoiceNumber::format("INV", 7).as_str(), "INV-007");
        assert_eq!(InvoiceNumber::format("ACME", 42).as_str(), "ACME-042");
        assert_eq!(InvoiceNumber::format("INV", 1234).as_str(), "INV-1234");
    }

    #[test]
    fn blank_prefix_uses_default() {
        assert_eq!(InvoiceNumber::format("  ", 1).as_str(), "INV-001");
    }

    #[test]
    fn parts_splits_on_last_dash() {
        let n = InvoiceNumber::format("GST-2026", 15);
        assert_eq!(n.parts(), Some(("GST-2026", 15)));
    }

    #[test]
    fn from_str_rejects_missing_sequence() {
        assert!("INV".parse::<InvoiceNumber>().is_err());
        assert!("INV-".parse::<InvoiceNumber>().is_err());
        assert!("INV-12a".parse::<InvoiceNumber>().is_err());
        assert!("".parse::<InvoiceNumber>().is_err());
        assert_eq!("INV-010".parse::<InvoiceNumber>().unwrap().parts(), Some(("INV", 10)));
    }
}
