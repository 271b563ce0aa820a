use serde::{Deserialize, Serialize};

use gstinvoice_core::{DEFAULT_INVOICE_PREFIX, DomainError, DomainResult, ValueObject, is_valid_gstin};

/// Payment terms applied when settings don't specify any.
pub const DEFAULT_PAYMENT_TERMS_DAYS: u32 = 15;

fn default_invoice_prefix() -> String {
    DEFAULT_INVOICE_PREFIX.to_string()
}

fn default_payment_terms_days() -> u32 {
    DEFAULT_PAYMENT_TERMS_DAYS
}

/// The issuing business, as configured in settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSettings {
    pub name: String,
    pub gstin: String,
    /// State name used for the tax regime decision.
    pub state: String,
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_invoice_prefix")]
    pub invoice_prefix: String,
    #[serde(rename = "paymentTerms", default = "default_payment_terms_days")]
    pub payment_terms_days: u32,
}

impl ValueObject for BusinessSettings {}

impl Default for BusinessSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            gstin: String::new(),
            state: String::new(),
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            invoice_prefix: default_invoice_prefix(),
            payment_terms_days: DEFAULT_PAYMENT_TERMS_DAYS,
        }
    }
}

impl BusinessSettings {
    /// Name, GSTIN, state and address are required; the GSTIN must be well formed.
    pub fn validate(&self) -> DomainResult<()> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("gstin", &self.gstin),
            ("state", &self.state),
            ("address", &self.address),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect();

        if !missing.is_empty() {
            return Err(DomainError::validation(format!(
                "business settings missing required fields: {}",
                missing.join(", ")
            )));
        }

        if !is_valid_gstin(&self.gstin) {
            return Err(DomainError::invalid_gstin(self.gstin.clone()));
        }

        Ok(())
    }

    /// Prefix for generated invoice numbers, never blank.
    pub fn prefix(&self) -> &str {
        let p = self.invoice_prefix.trim();
        if p.is_empty() { DEFAULT_INVOICE_PREFIX } else { p }
    }
}

/// The billed party.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetails {
    pub name: String,
    /// Optional; validated only when present.
    #[serde(default)]
    pub gstin: String,
    pub state: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
}

impl ValueObject for ClientDetails {}
