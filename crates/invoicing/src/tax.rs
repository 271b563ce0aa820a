//! GST computation: subtotal, CGST/SGST vs IGST split, and total.
//!
//! The combined rate is a flat 18% for every line. Intra-state supplies split
//! it evenly into CGST and SGST; inter-state supplies charge it as IGST.

use serde::{Deserialize, Serialize};

use gstinvoice_core::ValueObject;

use crate::line_item::{LineItem, sanitize};

/// Central GST share for intra-state supplies.
pub const CGST_RATE: f64 = 0.09;
/// State GST share for intra-state supplies.
pub const SGST_RATE: f64 = 0.09;
/// Integrated GST for inter-state supplies.
pub const IGST_RATE: f64 = 0.18;

/// Which tax lines apply to an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    /// A state is missing or the subtotal is zero; no tax rows are shown.
    NoTaxApplicable,
    /// Business and client are in the same state: CGST + SGST.
    IntraState,
    /// Different states: IGST.
    InterState,
}

impl TaxRegime {
    pub fn shows_cgst_sgst(self) -> bool {
        self == TaxRegime::IntraState
    }

    pub fn shows_igst(self) -> bool {
        self == TaxRegime::InterState
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaxRegime::NoTaxApplicable => "none",
            TaxRegime::IntraState => "intrastate",
            TaxRegime::InterState => "interstate",
        }
    }
}

/// Result of a tax computation. Amounts are unrounded rupees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub subtotal: f64,
    pub cgst: f64,
    pub sgst: f64,
    pub igst: f64,
    pub total: f64,
    pub regime: TaxRegime,
}

impl ValueObject for TaxBreakdown {}

impl TaxBreakdown {
    fn untaxed(subtotal: f64) -> Self {
        Self {
            subtotal,
            cgst: 0.0,
            sgst: 0.0,
            igst: 0.0,
            total: subtotal,
            regime: TaxRegime::NoTaxApplicable,
        }
    }

    /// Total tax charged across all components.
    pub fn tax_amount(&self) -> f64 {
        self.cgst + self.sgst + self.igst
    }

    /// Total rounded to the nearest whole rupee, as used for amount in words.
    pub fn rounded_total(&self) -> u64 {
        round_rupees(self.total)
    }

    pub fn display_subtotal(&self) -> String {
        format_inr(self.subtotal)
    }

    pub fn display_cgst(&self) -> String {
        format_inr(self.cgst)
    }

    pub fn display_sgst(&self) -> String {
        format_inr(self.sgst)
    }

    pub fn display_igst(&self) -> String {
        format_inr(self.igst)
    }

    pub fn display_total(&self) -> String {
        format_inr(self.total)
    }
}

/// Compute subtotal, tax split and total for `items`.
///
/// States are compared with exact, case-sensitive equality. Empty states or a
/// zero subtotal yield [`TaxRegime::NoTaxApplicable`] with `total == subtotal`.
pub fn compute_totals(items: &[LineItem], business_state: &str, client_state: &str) -> TaxBreakdown {
    let subtotal = sanitize(items.iter().map(LineItem::amount).sum());

    let breakdown = if business_state.is_empty() || client_state.is_empty() || subtotal == 0.0 {
        TaxBreakdown::untaxed(subtotal)
    } else if business_state == client_state {
        let cgst = subtotal * CGST_RATE;
        let sgst = subtotal * SGST_RATE;
        TaxBreakdown {
            subtotal,
            cgst,
            sgst,
            igst: 0.0,
            total: subtotal + cgst + sgst,
            regime: TaxRegime::IntraState,
        }
    } else {
        let igst = subtotal * IGST_RATE;
        TaxBreakdown {
            subtotal,
            cgst: 0.0,
            sgst: 0.0,
            igst,
            total: subtotal + igst,
            regime: TaxRegime::InterState,
        }
    };

    tracing::debug!(
        items = items.len(),
        subtotal = breakdown.subtotal,
        total = breakdown.total,
        regime = breakdown.regime.as_str(),
        "computed invoice totals"
    );

    breakdown
}

/// Round a rupee amount to the nearest whole rupee (halves round up).
///
/// Non-finite or negative input yields 0. Values beyond 2^53 are not exact.
pub fn round_rupees(amount: f64) -> u64 {
    let amount = sanitize(amount);
    // `as` saturates at u64::MAX for out-of-range floats.
    amount.round() as u64
}

/// Two-decimal presentation with the rupee sign, e.g. `₹1180.00`.
pub fn format_inr(amount: f64) -> String {
    format!("₹{:.2}", sanitize(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-6;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= EPS * b.abs().max(1.0)
    }

    fn items() -> Vec<LineItem> {
        vec![
            LineItem::new("Design", 2.0, 500.0),
            LineItem::new("Hosting", 1.0, 1000.0),
        ]
    }

    #[test]
    fn same_state_splits_into_cgst_and_sgst() {
        let t = compute_totals(&items(), "Maharashtra", "Maharashtra");
        assert_eq!(t.regime, TaxRegime::IntraState);
        assert_eq!(t.subtotal, 2000.0);
        assert!(close(t.cgst, 180.0));
        assert!(close(t.sgst, 180.0));
        assert_eq!(t.igst, 0.0);
        assert!(close(t.total, 2360.0));
        assert!(t.regime.shows_cgst_sgst());
        assert!(!t.regime.shows_igst());
    }

    #[test]
    fn different_states_charge_igst() {
        let t = compute_totals(&items(), "Maharashtra", "Karnataka");
        assert_eq!(t.regime, TaxRegime::InterState);
        assert_eq!(t.cgst, 0.0);
        assert_eq!(t.sgst, 0.0);
        assert!(close(t.igst, 360.0));
        assert!(close(t.total, 2360.0));
    }

    #[test]
    fn missing_state_means_no_tax() {
        for (b, c) in [("", "Goa"), ("Goa", ""), ("", "")] {
            let t = compute_totals(&items(), b, c);
            assert_eq!(t.regime, TaxRegime::NoTaxApplicable);
            assert_eq!(t.tax_amount(), 0.0);
            assert_eq!(t.total, t.subtotal);
        }
    }

    #[test]
    fn zero_subtotal_means_no_tax() {
        let t = compute_totals(&[LineItem::new("Free sample", 3.0, 0.0)], "Goa", "Goa");
        assert_eq!(t.regime, TaxRegime::NoTaxApplicable);
        assert_eq!(t.total, 0.0);

        let t = compute_totals(&[], "Goa", "Kerala");
        assert_eq!(t.regime, TaxRegime::NoTaxApplicable);
        assert_eq!(t.subtotal, 0.0);
    }

    #[test]
    fn state_comparison_is_case_sensitive() {
        let t = compute_totals(&items(), "Goa", "goa");
        assert_eq!(t.regime, TaxRegime::InterState);
        let t = compute_totals(&items(), "Goa", "Goa ");
        assert_eq!(t.regime, TaxRegime::InterState);
    }

    #[test]
    fn malformed_items_do_not_poison_totals() {
        let items = vec![
            LineItem::new("ok", 1.0, 100.0),
            LineItem::new("nan", f64::NAN, 50.0),
            LineItem::new("negative", 1.0, -40.0),
        ];
        let t = compute_totals(&items, "Goa", "Goa");
        assert_eq!(t.subtotal, 100.0);
        assert!(!t.total.is_nan());
        assert!(close(t.total, 118.0));
    }

    #[test]
    fn overflowing_subtotal_degrades_to_zero() {
        let items = vec![
            LineItem::new("a", 1.0, f64::MAX),
            LineItem::new("b", 1.0, f64::MAX),
        ];
        let t = compute_totals(&items, "Goa", "Goa");
        assert_eq!(t.subtotal, 0.0);
        assert_eq!(t.regime, TaxRegime::NoTaxApplicable);
    }

    #[test]
    fn presentation_uses_two_decimals() {
        let t = compute_totals(&[LineItem::new("x", 1.5, 333.0)], "Goa", "Kerala");
        assert_eq!(t.display_subtotal(), "₹499.50");
        assert_eq!(t.display_igst(), "₹89.91");
        assert_eq!(t.display_total(), "₹589.41");
        assert_eq!(t.display_cgst(), "₹0.00");
        assert_eq!(format_inr(1180.0), "₹1180.00");
        assert_eq!(format_inr(f64::NAN), "₹0.00");
    }

    #[test]
    fn rounded_total_rounds_half_up() {
        assert_eq!(round_rupees(1179.5), 1180);
        assert_eq!(round_rupees(1179.49), 1179);
        assert_eq!(round_rupees(-3.0), 0);
        assert_eq!(round_rupees(f64::INFINITY), 0);
    }

    fn arb_items() -> impl Strategy<Value = Vec<LineItem>> {
        prop::collection::vec(
            (0.01f64..1_000.0, 0.01f64..100_000.0).prop_map(|(q, r)| LineItem::new("item", q, r)),
            1..10,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: intra-state tax is two equal 9% halves of an 18% total.
        #[test]
        fn intra_state_totals(items in arb_items()) {
            let t = compute_totals(&items, "Kerala", "Kerala");
            let s = t.subtotal;
            prop_assert!(s > 0.0);
            prop_assert_eq!(t.regime, TaxRegime::IntraState);
            prop_assert_eq!(t.cgst, t.sgst);
            prop_assert!(close(t.cgst, s * 0.09));
            prop_assert_eq!(t.igst, 0.0);
            prop_assert!(close(t.total, s * 1.18));
        }

        /// Property: inter-state tax is a single 18% IGST line.
        #[test]
        fn inter_state_totals(items in arb_items()) {
            let t = compute_totals(&items, "Kerala", "Punjab");
            let s = t.subtotal;
            prop_assert_eq!(t.regime, TaxRegime::InterState);
            prop_assert!(close(t.igst, s * 0.18));
            prop_assert_eq!(t.cgst, 0.0);
            prop_assert_eq!(t.sgst, 0.0);
            prop_assert!(close(t.total, s * 1.18));
        }

        /// Property: a missing state never produces tax.
        #[test]
        fn missing_state_is_untaxed(items in arb_items(), which in 0u8..3) {
            let (b, c) = match which {
                0 => ("", "Punjab"),
                1 => ("Punjab", ""),
                _ => ("", ""),
            };
            let t = compute_totals(&items, b, c);
            prop_assert_eq!(t.regime, TaxRegime::NoTaxApplicable);
            prop_assert_eq!(t.tax_amount(), 0.0);
            prop_assert_eq!(t.total, t.subtotal);
        }

        /// Property: recomputation is bit-identical.
        #[test]
        fn compute_totals_is_idempotent(items in arb_items(), same in any::<bool>()) {
            let client = if same { "Assam" } else { "Bihar" };
            let a = compute_totals(&items, "Assam", client);
            let b = compute_totals(&items, "Assam", client);
            prop_assert_eq!(a.subtotal.to_bits(), b.subtotal.to_bits());
            prop_assert_eq!(a.total.to_bits(), b.total.to_bits());
            prop_assert_eq!(a, b);
        }

        /// Property: outputs are never NaN or negative, whatever the input.
        #[test]
        fn outputs_are_finite_and_non_negative(
            raw in prop::collection::vec((any::<f64>(), any::<f64>()), 0..8)
        ) {
            let items: Vec<LineItem> = raw.into_iter().map(|(q, r)| LineItem::new("x", q, r)).collect();
            let t = compute_totals(&items, "Goa", "Goa");
            for v in [t.subtotal, t.cgst, t.sgst, t.igst, t.total] {
                prop_assert!(!v.is_nan());
                prop_assert!(v >= 0.0);
            }
        }
    }
}
