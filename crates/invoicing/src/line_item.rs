use serde::{Deserialize, Serialize};

use gstinvoice_core::ValueObject;

/// One row of an invoice.
///
/// Fields hold whatever the user typed, already coerced to numbers. Nothing
/// here rejects bad input: invalid quantities or rates simply contribute
/// nothing to the subtotal until validation runs before generation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    #[serde(default)]
    pub quantity: f64,
    /// Price per unit in rupees.
    #[serde(default)]
    pub rate: f64,
}

impl ValueObject for LineItem {}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: f64, rate: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            rate,
        }
    }

    /// Build a line from raw form text; unparsable numbers become 0.
    pub fn from_form(description: &str, quantity: &str, rate: &str) -> Self {
        Self {
            description: description.to_string(),
            quantity: coerce_number(quantity),
            rate: coerce_number(rate),
        }
    }

    /// `quantity * rate`, or 0 if either side is unusable.
    pub fn amount(&self) -> f64 {
        let amount = sanitize(self.quantity) * sanitize(self.rate);
        if amount.is_finite() { amount } else { 0.0 }
    }

    /// True if any field carries user input.
    pub fn has_content(&self) -> bool {
        !self.description.trim().is_empty() || self.quantity != 0.0 || self.rate != 0.0
    }
}

/// Parse user-entered text as a number, falling back to 0.
pub fn coerce_number(raw: &str) -> f64 {
    raw.trim().parse::<f64>().map(sanitize).unwrap_or(0.0)
}

/// Clamp NaN, infinities and negatives to 0.
pub(crate) fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}
