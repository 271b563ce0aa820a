//! Typed records and the storage keys they live under.
//!
//! Keys keep the extension's legacy string layout so existing data stays
//! readable, but nothing outside this module matches on prefixes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use gstinvoice_core::InvoiceNumber;
use gstinvoice_invoicing::{ClientDetails, Invoice, LineItem};

use crate::error::StoreError;

const INVOICE_PREFIX: &str = "invoice_";
const CLIENT_TEMPLATE_PREFIX: &str = "client_template_";
const SAVED_ITEM_PREFIX: &str = "saved_item_";
const DRAFT_KEY: &str = "invoice_draft";
const BUSINESS_SETTINGS_KEY: &str = "businessSettings";
const LAST_INVOICE_NUMBER_KEY: &str = "lastInvoiceNumber";

/// Where a record is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKey {
    /// A generated invoice, disambiguated by save time (ms since epoch).
    Invoice { number: String, saved_at_ms: i64 },
    /// A client template keyed by its name slug.
    ClientTemplate(String),
    /// A saved catalogue item keyed by its id (ms since epoch at creation).
    SavedItem(i64),
    /// The single in-progress draft.
    Draft,
    BusinessSettings,
    LastInvoiceNumber,
}

impl RecordKey {
    pub fn invoice(number: &InvoiceNumber, saved_at: DateTime<Utc>) -> Self {
        Self::Invoice {
            number: number.as_str().to_string(),
            saved_at_ms: saved_at.timestamp_millis(),
        }
    }

    pub fn client_template(name: &str) -> Self {
        Self::ClientTemplate(template_slug(name))
    }

    pub fn to_storage_key(&self) -> String {
        match self {
            RecordKey::Invoice { number, saved_at_ms } => {
                format!("{INVOICE_PREFIX}{number}_{saved_at_ms}")
            }
            RecordKey::ClientTemplate(slug) => format!("{CLIENT_TEMPLATE_PREFIX}{slug}"),
            RecordKey::SavedItem(id) => format!("{SAVED_ITEM_PREFIX}{id}"),
            RecordKey::Draft => DRAFT_KEY.to_string(),
            RecordKey::BusinessSettings => BUSINESS_SETTINGS_KEY.to_string(),
            RecordKey::LastInvoiceNumber => LAST_INVOICE_NUMBER_KEY.to_string(),
        }
    }

    /// Parse a storage key. The draft key shares the invoice prefix and is
    /// matched first.
    pub fn parse(key: &str) -> Result<Self, StoreError> {
        match key {
            DRAFT_KEY => return Ok(RecordKey::Draft),
            BUSINESS_SETTINGS_KEY => return Ok(RecordKey::BusinessSettings),
            LAST_INVOICE_NUMBER_KEY => return Ok(RecordKey::LastInvoiceNumber),
            _ => {}
        }

        let unknown = || StoreError::UnknownKey(key.to_string());

        if let Some(slug) = key.strip_prefix(CLIENT_TEMPLATE_PREFIX) {
            if slug.is_empty() {
                return Err(unknown());
            }
            return Ok(RecordKey::ClientTemplate(slug.to_string()));
        }
        if let Some(id) = key.strip_prefix(SAVED_ITEM_PREFIX) {
            return id.parse().map(RecordKey::SavedItem).map_err(|_| unknown());
        }
        if let Some(rest) = key.strip_prefix(INVOICE_PREFIX) {
            let (number, ms) = rest.rsplit_once('_').ok_or_else(unknown)?;
            if number.is_empty() {
                return Err(unknown());
            }
            let saved_at_ms = ms.parse().map_err(|_| unknown())?;
            return Ok(RecordKey::Invoice {
                number: number.to_string(),
                saved_at_ms,
            });
        }

        Err(unknown())
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            RecordKey::Invoice { .. } => RecordKind::Invoice,
            RecordKey::ClientTemplate(_) => RecordKind::ClientTemplate,
            RecordKey::SavedItem(_) => RecordKind::SavedItem,
            RecordKey::Draft => RecordKind::Draft,
            RecordKey::BusinessSettings => RecordKind::BusinessSettings,
            RecordKey::LastInvoiceNumber => RecordKind::LastInvoiceNumber,
        }
    }
}

impl core::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_storage_key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Invoice,
    ClientTemplate,
    SavedItem,
    Draft,
    BusinessSettings,
    LastInvoiceNumber,
}

/// Lower-cased name with whitespace runs replaced by `_`.
pub fn template_slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// A reusable set of client details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientTemplate {
    #[serde(flatten)]
    pub client: ClientDetails,
    pub saved_at: DateTime<Utc>,
}

/// A catalogue entry that can be dropped onto an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedItem {
    pub name: String,
    pub rate: f64,
    #[serde(default)]
    pub description: String,
    pub saved_at: DateTime<Utc>,
}

impl SavedItem {
    /// A one-unit line item for this catalogue entry.
    pub fn to_line_item(&self) -> LineItem {
        let description = if self.description.trim().is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.name, self.description)
        };
        LineItem::new(description, 1.0, self.rate)
    }
}

/// Unfinished invoice form contents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(default)]
    pub client: ClientDetails,
    #[serde(default)]
    pub invoice_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Set by the store when saving.
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Draft {
    /// A client name or any filled-in item.
    pub fn has_meaningful_data(&self) -> bool {
        !self.client.name.is_empty() || self.items.iter().any(LineItem::has_content)
    }

    /// Equal apart from the save timestamp.
    pub fn same_content(&self, other: &Draft) -> bool {
        self.client == other.client
            && self.invoice_date == other.invoice_date
            && self.due_date == other.due_date
            && self.items == other.items
    }
}

/// Any record kind the store holds as a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Invoice(Box<Invoice>),
    ClientTemplate(ClientTemplate),
    SavedItem(SavedItem),
    Draft(Draft),
}
