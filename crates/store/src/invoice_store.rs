//! File-backed invoice store: creation, lookup, filtered listing and status
//! updates. Depends on [`ClientStore`] to resolve `client_id` references.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::info;

use ledgerly_core::{ClientId, DomainError, InvoiceId};
use ledgerly_invoicing::{Invoice, InvoiceStatus, NewInvoice};

use crate::client_store::ClientStore;
use crate::collection::{Collection, Record};
use crate::error::StoreResult;

impl Record for Invoice {
    fn record_id(&self) -> u64 {
        self.id.value()
    }
}

/// Owns the `invoices.json` collection. All invoice mutation funnels through
/// this store; each operation holds the store lock for the full
/// load→mutate→persist.
#[derive(Debug)]
pub struct InvoiceStore {
    path: PathBuf,
    clients: Arc<ClientStore>,
    lock: Mutex<()>,
}

impl InvoiceStore {
    pub fn new(path: impl Into<PathBuf>, clients: Arc<ClientStore>) -> Self {
        Self {
            path: path.into(),
            clients,
            lock: Mutex::new(()),
        }
    }

    /// Conventional store location within a data directory.
    pub fn open_in(data_dir: impl AsRef<Path>, clients: Arc<ClientStore>) -> Self {
        Self::new(data_dir.as_ref().join("invoices.json"), clients)
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        // A poisoned lock only means a previous operation panicked before
        // persisting; the on-disk state is still authoritative.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Validate line items, resolve the client reference, compute the total
    /// and persist a new draft invoice with the next sequential ID.
    pub fn create_invoice(&self, input: NewInvoice) -> StoreResult<Invoice> {
        input.validate()?;

        if !self.clients.contains(input.client_id)? {
            return Err(
                DomainError::not_found(format!("client {} not found", input.client_id)).into(),
            );
        }

        let _guard = self.guard();
        let mut collection = Collection::<Invoice>::load(&self.path)?;
        let id = InvoiceId::new(collection.allocate_id());
        let invoice = input.into_invoice(id, Utc::now());
        collection.records.push(invoice.clone());
        collection.save(&self.path)?;

        info!(
            invoice_id = %invoice.id,
            client_id = %invoice.client_id,
            total = invoice.total,
            "invoice created"
        );
        Ok(invoice)
    }

    /// Exact ID lookup.
    pub fn get_invoice(&self, id: InvoiceId) -> StoreResult<Invoice> {
        let _guard = self.guard();
        let collection = Collection::<Invoice>::load(&self.path)?;
        collection
            .records
            .into_iter()
            .find(|inv| inv.id == id)
            .ok_or_else(|| DomainError::not_found(format!("invoice {id} not found")).into())
    }

    /// Filtered listing in insertion order. Filters are AND-combined; no
    /// filters returns the full collection.
    pub fn list_invoices(
        &self,
        client_id: Option<ClientId>,
        status: Option<InvoiceStatus>,
    ) -> StoreResult<Vec<Invoice>> {
        let _guard = self.guard();
        let collection = Collection::<Invoice>::load(&self.path)?;
        Ok(collection
            .records
            .into_iter()
            .filter(|inv| client_id.is_none_or(|c| inv.client_id == c))
            .filter(|inv| status.is_none_or(|s| inv.status == s))
            .collect())
    }

    /// Overwrite the status of an existing invoice and persist.
    ///
    /// No transition restrictions: any status may replace any other.
    pub fn update_invoice_status(
        &self,
        id: InvoiceId,
        status: InvoiceStatus,
    ) -> StoreResult<Invoice> {
        let _guard = self.guard();
        let mut collection = Collection::<Invoice>::load(&self.path)?;
        let invoice = collection
            .records
            .iter_mut()
            .find(|inv| inv.id == id)
            .ok_or_else(|| DomainError::not_found(format!("invoice {id} not found")))?;

        invoice.status = status;
        let updated = invoice.clone();
        collection.save(&self.path)?;

        info!(invoice_id = %id, status = %status, "invoice status updated");
        Ok(updated)
    }
}
