//! Revenue statistics over generated invoices.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::invoice::Invoice;

/// Revenue for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    /// Short label such as `"Mar 2026"`.
    pub label: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub invoice_count: usize,
    pub total_revenue: f64,
    /// Sum of unpaid and overdue invoice totals.
    pub unpaid_amount: f64,
    pub paid_count: usize,
    pub unpaid_count: usize,
    /// Client with the highest billed total; on a tie, the client that first
    /// appears later in the history wins.
    pub top_client: Option<String>,
    /// Ascending by month.
    pub monthly: Vec<MonthlyRevenue>,
}

impl RevenueSummary {
    pub fn from_invoices(invoices: &[Invoice]) -> Self {
        let mut summary = Self {
            invoice_count: invoices.len(),
            ..Self::default()
        };

        // (first-seen order, revenue)
        let mut by_client: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
        let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();

        for (seen, invoice) in invoices.iter().enumerate() {
            let total = invoice.total();
            summary.total_revenue += total;

            if invoice.payment_status().is_outstanding() {
                summary.unpaid_amount += total;
                summary.unpaid_count += 1;
            } else {
                summary.paid_count += 1;
            }

            let client = match invoice.client().name.trim() {
                "" => "Unknown",
                name => name,
            };
            by_client.entry(client).or_insert((seen, 0.0)).1 += total;

            let date = invoice.date();
            *by_month.entry((date.year(), date.month())).or_insert(0.0) += total;
        }

        summary.top_client = by_client
            .into_iter()
            .max_by(|(_, (seen_a, rev_a)), (_, (seen_b, rev_b))| {
                rev_a.total_cmp(rev_b).then(seen_a.cmp(seen_b))
            })
            .map(|(name, _)| name.to_string());

        summary.monthly = by_month
            .into_iter()
            .map(|((year, month), revenue)| MonthlyRevenue {
                year,
                month,
                label: month_label(year, month),
                revenue,
            })
            .collect();

        summary
    }

    /// Share of paid invoices in `0.0..=1.0`; 0 when there are none.
    pub fn paid_ratio(&self) -> f64 {
        if self.invoice_count == 0 {
            0.0
        } else {
            self.paid_count as f64 / self.invoice_count as f64
        }
    }
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{month:02}/{year}"))
}
