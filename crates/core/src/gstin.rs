//! GSTIN (Goods and Services Tax Identification Number) value type.

use core::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// A syntactically valid GSTIN.
///
/// Layout: 2-digit state code, 10-character PAN (5 letters, 4 digits, 1
/// letter), entity number (`1-9` or `A-Z`), the literal `Z`, and a check
/// character (`0-9` or `A-Z`). Only upper-case input is accepted; the check
/// character itself is not verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Gstin(String);

impl ValueObject for Gstin {}

impl Gstin {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if is_valid_gstin(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(DomainError::invalid_gstin(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Two-digit state code prefix.
    pub fn state_code(&self) -> &str {
        &self.0[..2]
    }
}

static GSTIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$")
        .expect("GSTIN pattern is a valid regex")
});

/// Returns `true` if `raw` has the GSTIN shape.
pub fn is_valid_gstin(raw: &str) -> bool {
    GSTIN_PATTERN.is_match(raw)
}

impl core::fmt::Display for Gstin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Gstin {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Gstin {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_gstin(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::invalid_gstin(value))
        }
    }
}

impl From<Gstin> for String {
    fn from(value: Gstin) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_well_formed_gstin() {
        let g = Gstin::parse("27AAPFU0939F1ZV").unwrap();
        assert_eq!(g.state_code(), "27");
        assert!(is_valid_gstin("29ABCDE1234F1Z5"));
        assert!(is_valid_gstin("07ABCDE1234FAZ0"));
    }

    #[test]
    fn rejects_malformed_gstin() {
        // lower case
        assert!(!is_valid_gstin("27aapfu0939f1zv"));
        // entity number 0 is not allowed
        assert!(!is_valid_gstin("27AAPFU0939F0ZV"));
        // 14th character must be Z
        assert!(!is_valid_gstin("27AAPFU0939F1YV"));
        // wrong length
        assert!(!is_valid_gstin("27AAPFU0939F1Z"));
        assert!(!is_valid_gstin(""));
        // non-ASCII check character
        assert!(!is_valid_gstin("27AAPFU0939F1Zé"));
        // anchored at both ends
        assert!(!is_valid_gstin("27AAPFU0939F1ZV\n"));
        assert!(!is_valid_gstin(" 27AAPFU0939F1ZV"));
    }

    #[test]
    fn deserialize_validates() {
        let ok: Result<Gstin, _> = serde_json::from_str("\"27AAPFU0939F1ZV\"");
        assert!(ok.is_ok());
        let bad: Result<Gstin, _> = serde_json::from_str("\"not-a-gstin\"");
        assert!(bad.is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: anything matching the registration pattern is accepted.
        #[test]
        fn generated_gstins_are_valid(g in "[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]") {
            prop_assert!(is_valid_gstin(&g));
        }

        /// Property: surrounding text or a trailing newline is never accepted.
        #[test]
        fn padded_gstins_are_rejected(
            g in "[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]",
            pad in "[ 0-9A-Z\n]{1,3}",
        ) {
            let prefixed = format!("{pad}{g}");
            let suffixed = format!("{g}{pad}");
            prop_assert!(!is_valid_gstin(&prefixed));
            prop_assert!(!is_valid_gstin(&suffixed));
        }
    }
}
