use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gstinvoice_core::{DomainError, InvoiceNumber, is_valid_gstin};

use crate::line_item::LineItem;
use crate::party::{BusinessSettings, ClientDetails};
use crate::tax::{TaxBreakdown, TaxRegime, compute_totals};
use crate::words::to_words;

/// Payment status tracked per stored invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
    Overdue,
}

impl PaymentStatus {
    /// Unpaid and overdue invoices both count as outstanding.
    pub fn is_outstanding(self) -> bool {
        self != PaymentStatus::Paid
    }
}

/// Everything a user entered on the invoice form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateInvoice {
    pub number: InvoiceNumber,
    pub date: NaiveDate,
    /// Defaults to `date` plus the business's payment terms.
    pub due_date: Option<NaiveDate>,
    /// `None` until the user has saved business settings.
    pub business: Option<BusinessSettings>,
    pub client: ClientDetails,
    pub items: Vec<LineItem>,
}

/// All problems found while validating a [`GenerateInvoice`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", summarize(.0))]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

/// First three messages, then "and more..." like the form's toast.
fn summarize(messages: &[String]) -> String {
    let mut s = messages.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
    if messages.len() > 3 {
        s.push_str(", and more...");
    }
    s
}

fn missing_business() -> ValidationErrors {
    ValidationErrors(vec![
        "business details must be set up in settings first".to_string(),
    ])
}

impl From<ValidationErrors> for DomainError {
    fn from(value: ValidationErrors) -> Self {
        DomainError::validation(value.to_string())
    }
}

impl GenerateInvoice {
    /// Check the request before generation; every failure is reported.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        if self.business.is_none() {
            return Err(missing_business());
        }

        let mut errors = Vec::new();

        if self.client.name.trim().is_empty() {
            errors.push("Client name is required".to_string());
        }
        if self.client.state.is_empty() {
            errors.push("Client state is required".to_string());
        }
        if !self.client.gstin.is_empty() && !is_valid_gstin(&self.client.gstin) {
            errors.push("Invalid GSTIN format".to_string());
        }
        if self.items.is_empty() {
            errors.push("At least one item is required".to_string());
        }

        for (index, item) in self.items.iter().enumerate() {
            let n = index + 1;
            if item.description.trim().is_empty() {
                errors.push(format!("Item {n}: Description is required"));
            }
            if !(item.quantity > 0.0) {
                errors.push(format!("Item {n}: Quantity must be greater than 0"));
            }
            if !(item.rate > 0.0) {
                errors.push(format!("Item {n}: Rate must be greater than 0"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

/// A generated invoice.
///
/// The tax breakdown is a snapshot taken at generation time and is never
/// recomputed, so stored invoices keep the figures they were issued with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    number: InvoiceNumber,
    date: NaiveDate,
    due_date: NaiveDate,
    business: BusinessSettings,
    client: ClientDetails,
    items: Vec<LineItem>,
    totals: TaxBreakdown,
    total_in_words: String,
    #[serde(default)]
    payment_status: PaymentStatus,
}

impl Invoice {
    /// Validate `request` and freeze its totals into an invoice.
    pub fn generate(request: GenerateInvoice) -> Result<Self, ValidationErrors> {
        request.validate()?;

        let GenerateInvoice {
            number,
            date,
            due_date,
            business,
            client,
            items,
        } = request;
        let Some(business) = business else {
            return Err(missing_business());
        };

        let due_date = due_date.unwrap_or_else(|| default_due_date(date, business.payment_terms_days));
        let totals = compute_totals(&items, &business.state, &client.state);
        let total_in_words = to_words(totals.rounded_total());

        tracing::info!(
            invoice = %number,
            items = items.len(),
            total = totals.total,
            regime = totals.regime.as_str(),
            "generated invoice"
        );

        Ok(Self {
            number,
            date,
            due_date,
            business,
            client,
            items,
            totals,
            total_in_words,
            payment_status: PaymentStatus::Unpaid,
        })
    }

    pub fn number(&self) -> &InvoiceNumber {
        &self.number
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn business(&self) -> &BusinessSettings {
        &self.business
    }

    pub fn client(&self) -> &ClientDetails {
        &self.client
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn totals(&self) -> &TaxBreakdown {
        &self.totals
    }

    pub fn total(&self) -> f64 {
        self.totals.total
    }

    pub fn total_in_words(&self) -> &str {
        &self.total_in_words
    }

    pub fn tax_regime(&self) -> TaxRegime {
        self.totals.regime
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn set_payment_status(&mut self, status: PaymentStatus) {
        self.payment_status = status;
    }

    pub fn mark_paid(&mut self) {
        self.set_payment_status(PaymentStatus::Paid);
    }

    /// Whether the invoice is unpaid past its due date on `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.payment_status.is_outstanding() && today > self.due_date
    }
}

/// `date` plus `terms_days`, saturating at the last representable date.
pub fn default_due_date(date: NaiveDate, terms_days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(terms_days)))
        .unwrap_or(NaiveDate::MAX)
}
