use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use gstinvoice_core::{DomainError, InvoiceNumber};
use gstinvoice_invoicing::{BusinessSettings, ClientDetails, GenerateInvoice, Invoice};

use crate::error::StoreResult;
use crate::kv::KeyValueStore;
use crate::record::{ClientTemplate, Draft, Record, RecordKey, RecordKind, SavedItem};

/// How long an unfinished draft survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftPolicy {
    pub max_age: Duration,
}

impl Default for DraftPolicy {
    fn default() -> Self {
        Self {
            max_age: Duration::days(7),
        }
    }
}

/// Outcome of [`InvoiceBook::save_draft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftSave {
    Saved,
    /// Same content as the stored draft; nothing written.
    Unchanged,
    /// No client name and no filled-in items; nothing written.
    Empty,
}

/// Typed access to everything the invoicing app persists.
///
/// Time is always passed in by the caller so behaviour is reproducible.
#[derive(Debug, Clone)]
pub struct InvoiceBook<S> {
    store: S,
}

impl<S: KeyValueStore> InvoiceBook<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load<T: DeserializeOwned>(&self, key: &RecordKey) -> StoreResult<Option<T>> {
        match self.store.get(&key.to_storage_key())? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn put<T: Serialize>(&self, key: &RecordKey, value: &T) -> StoreResult<()> {
        let value = serde_json::to_value(value)?;
        self.store.set(&key.to_storage_key(), value)
    }

    fn delete(&self, key: &RecordKey) -> StoreResult<bool> {
        self.store.remove(&key.to_storage_key())
    }

    /// Parsed keys of one kind; unrecognised keys are skipped.
    fn keys_of(&self, kind: RecordKind) -> StoreResult<Vec<RecordKey>> {
        let mut keys = Vec::new();
        for raw in self.store.keys()? {
            match RecordKey::parse(&raw) {
                Ok(key) if key.kind() == kind => keys.push(key),
                Ok(_) => {}
                Err(_) => tracing::debug!(key = %raw, "skipping unrecognised storage key"),
            }
        }
        Ok(keys)
    }

    /// Load any document record by key.
    pub fn record(&self, key: &RecordKey) -> StoreResult<Option<Record>> {
        let record = match key {
            RecordKey::Invoice { .. } => self.load::<Invoice>(key)?.map(|i| Record::Invoice(Box::new(i))),
            RecordKey::ClientTemplate(_) => self.load(key)?.map(Record::ClientTemplate),
            RecordKey::SavedItem(_) => self.load(key)?.map(Record::SavedItem),
            RecordKey::Draft => self.load(key)?.map(Record::Draft),
            RecordKey::BusinessSettings | RecordKey::LastInvoiceNumber => None,
        };
        Ok(record)
    }

    // ---- business settings -------------------------------------------------

    pub fn business_settings(&self) -> StoreResult<Option<BusinessSettings>> {
        self.load(&RecordKey::BusinessSettings)
    }

    /// Validates before writing.
    pub fn save_business_settings(&self, settings: &BusinessSettings) -> StoreResult<()> {
        settings.validate()?;
        self.put(&RecordKey::BusinessSettings, settings)?;
        tracing::info!(business = %settings.name, state = %settings.state, "saved business settings");
        Ok(())
    }

    // ---- numbering ---------------------------------------------------------

    /// Sequence of the last issued invoice (0 if none).
    pub fn last_invoice_number(&self) -> StoreResult<u64> {
        Ok(self.load(&RecordKey::LastInvoiceNumber)?.unwrap_or(0))
    }

    /// Number the next invoice would get, e.g. `INV-008` after `7`.
    pub fn next_invoice_number(&self, prefix: &str) -> StoreResult<InvoiceNumber> {
        let next = self.last_invoice_number()?.saturating_add(1);
        Ok(InvoiceNumber::format(prefix, next))
    }

    /// Advance the counter to `sequence`. It never moves backwards.
    pub fn record_issued(&self, sequence: u64) -> StoreResult<()> {
        let last = self.last_invoice_number()?;
        if sequence <= last {
            return Err(DomainError::conflict(format!(
                "invoice sequence {sequence} is not after last issued {last}"
            ))
            .into());
        }
        self.put(&RecordKey::LastInvoiceNumber, &sequence)
    }

    // ---- invoices ----------------------------------------------------------

    pub fn save_invoice(&self, invoice: &Invoice, now: DateTime<Utc>) -> StoreResult<RecordKey> {
        let key = RecordKey::invoice(invoice.number(), now);
        self.put(&key, invoice)?;
        tracing::debug!(key = %key, "stored invoice");
        Ok(key)
    }

    pub fn invoice(&self, key: &RecordKey) -> StoreResult<Option<Invoice>> {
        if key.kind() != RecordKind::Invoice {
            return Ok(None);
        }
        self.load(key)
    }

    /// All stored invoices, newest invoice date first.
    ///
    /// Records that do not decode as an [`Invoice`] (older flat records
    /// written by the extension) are skipped; backend failures still fail
    /// the listing.
    pub fn invoices(&self) -> StoreResult<Vec<(RecordKey, Invoice)>> {
        let mut out = Vec::new();
        for key in self.keys_of(RecordKind::Invoice)? {
            let Some(value) = self.store.get(&key.to_storage_key())? else {
                continue;
            };
            match serde_json::from_value::<Invoice>(value) {
                Ok(invoice) => out.push((key, invoice)),
                Err(err) => tracing::warn!(key = %key, error = %err, "skipping undecodable invoice record"),
            }
        }
        out.sort_by(|(ka, a), (kb, b)| b.date().cmp(&a.date()).then_with(|| kb.cmp(ka)));
        Ok(out)
    }

    pub fn delete_invoice(&self, key: &RecordKey) -> StoreResult<bool> {
        if key.kind() != RecordKind::Invoice {
            return Ok(false);
        }
        self.delete(key)
    }

    // ---- client templates --------------------------------------------------

    /// Save `client` under its name slug, replacing any template with the
    /// same slug.
    pub fn save_client_template(&self, client: &ClientDetails, now: DateTime<Utc>) -> StoreResult<RecordKey> {
        if client.name.trim().is_empty() || client.state.is_empty() {
            return Err(DomainError::validation("client name and state are required for a template").into());
        }
        let key = RecordKey::client_template(&client.name);
        let template = ClientTemplate {
            client: client.clone(),
            saved_at: now,
        };
        self.put(&key, &template)?;
        Ok(key)
    }

    pub fn client_template(&self, slug: &str) -> StoreResult<Option<ClientTemplate>> {
        self.load(&RecordKey::ClientTemplate(slug.to_string()))
    }

    /// Templates sorted by client name.
    pub fn client_templates(&self) -> StoreResult<Vec<(String, ClientTemplate)>> {
        let mut out = Vec::new();
        for key in self.keys_of(RecordKind::ClientTemplate)? {
            if let (RecordKey::ClientTemplate(slug), Some(t)) = (&key, self.load::<ClientTemplate>(&key)?) {
                out.push((slug.clone(), t));
            }
        }
        out.sort_by(|(_, a), (_, b)| a.client.name.cmp(&b.client.name));
        Ok(out)
    }

    pub fn delete_client_template(&self, slug: &str) -> StoreResult<bool> {
        self.delete(&RecordKey::ClientTemplate(slug.to_string()))
    }

    // ---- saved items -------------------------------------------------------

    /// Add a catalogue item; returns its id.
    pub fn add_saved_item(
        &self,
        name: &str,
        rate: f64,
        description: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("item name is required").into());
        }
        if !(rate.is_finite() && rate > 0.0) {
            return Err(DomainError::validation("item rate must be greater than 0").into());
        }

        // Ids are creation milliseconds; step forward on collision.
        let mut id = now.timestamp_millis();
        while self.store.get(&RecordKey::SavedItem(id).to_storage_key())?.is_some() {
            id += 1;
        }

        let item = SavedItem {
            name: name.to_string(),
            rate,
            description: description.trim().to_string(),
            saved_at: now,
        };
        self.put(&RecordKey::SavedItem(id), &item)?;
        Ok(id)
    }

    /// Saved items in creation order.
    pub fn saved_items(&self) -> StoreResult<Vec<(i64, SavedItem)>> {
        let mut out = Vec::new();
        for key in self.keys_of(RecordKind::SavedItem)? {
            if let (RecordKey::SavedItem(id), Some(item)) = (&key, self.load::<SavedItem>(&key)?) {
                out.push((*id, item));
            }
        }
        out.sort_by_key(|(id, _)| *id);
        Ok(out)
    }

    pub fn delete_saved_item(&self, id: i64) -> StoreResult<bool> {
        self.delete(&RecordKey::SavedItem(id))
    }

    // ---- drafts ------------------------------------------------------------

    pub fn save_draft(&self, draft: &Draft, now: DateTime<Utc>) -> StoreResult<DraftSave> {
        if !draft.has_meaningful_data() {
            return Ok(DraftSave::Empty);
        }
        if let Some(existing) = self.load::<Draft>(&RecordKey::Draft)? {
            if existing.same_content(draft) {
                return Ok(DraftSave::Unchanged);
            }
        }

        let stored = Draft {
            saved_at: Some(now),
            ..draft.clone()
        };
        self.put(&RecordKey::Draft, &stored)?;
        tracing::debug!(items = stored.items.len(), "auto-saved draft");
        Ok(DraftSave::Saved)
    }

    /// The stored draft unless it is older than `policy.max_age`, in which
    /// case it is deleted. A draft without a save time is kept.
    pub fn restore_draft(&self, now: DateTime<Utc>, policy: &DraftPolicy) -> StoreResult<Option<Draft>> {
        let Some(draft) = self.load::<Draft>(&RecordKey::Draft)? else {
            return Ok(None);
        };

        let fresh = draft
            .saved_at
            .is_none_or(|saved_at| now.signed_duration_since(saved_at) <= policy.max_age);
        if !fresh {
            tracing::warn!(saved_at = ?draft.saved_at, "discarding stale draft");
            self.clear_draft()?;
            return Ok(None);
        }

        Ok(Some(draft))
    }

    pub fn clear_draft(&self) -> StoreResult<()> {
        self.delete(&RecordKey::Draft)?;
        Ok(())
    }
}

/// Validate and generate an invoice, store it, advance the counter and drop
/// the draft.
pub fn generate_and_store<S: KeyValueStore>(
    book: &InvoiceBook<S>,
    request: GenerateInvoice,
    now: DateTime<Utc>,
) -> StoreResult<(RecordKey, Invoice)> {
    let invoice = Invoice::generate(request).map_err(DomainError::from)?;
    let key = book.save_invoice(&invoice, now)?;

    if let Some((_, sequence)) = invoice.number().parts() {
        if sequence > book.last_invoice_number()? {
            book.record_issued(sequence)?;
        }
    }

    book.clear_draft()?;
    Ok((key, invoice))
}
