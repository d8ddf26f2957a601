//! File-backed client store: CRUD + search.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use tracing::info;

use ledgerly_clients::{Client, NewClient};
use ledgerly_core::{ClientId, DomainError};

use crate::collection::{Collection, Record};
use crate::error::StoreResult;

impl Record for Client {
    fn record_id(&self) -> u64 {
        self.id.value()
    }
}

/// Owns the `clients.json` collection. All client mutation funnels through
/// this store; each operation holds the store lock for the full
/// load→mutate→persist.
#[derive(Debug)]
pub struct ClientStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ClientStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Conventional store location within a data directory.
    pub fn open_in(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join("clients.json"))
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        // A poisoned lock only means a previous operation panicked before
        // persisting; the on-disk state is still authoritative.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Validate and persist a new client, assigning the next sequential ID.
    pub fn add_client(&self, input: NewClient) -> StoreResult<Client> {
        input.validate()?;

        let _guard = self.guard();
        let mut collection = Collection::<Client>::load(&self.path)?;
        let id = ClientId::new(collection.allocate_id());
        let client = input.into_client(id, Utc::now());
        collection.records.push(client.clone());
        collection.save(&self.path)?;

        info!(client_id = %client.id, name = %client.name, "client added");
        Ok(client)
    }

    /// Exact ID lookup.
    pub fn get_client(&self, id: ClientId) -> StoreResult<Client> {
        let _guard = self.guard();
        let collection = Collection::<Client>::load(&self.path)?;
        collection
            .records
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::not_found(format!("client {id} not found")).into())
    }

    /// Whether a client with this ID exists.
    pub fn contains(&self, id: ClientId) -> StoreResult<bool> {
        let _guard = self.guard();
        let collection = Collection::<Client>::load(&self.path)?;
        Ok(collection.records.iter().any(|c| c.id == id))
    }

    /// Case-insensitive substring search over name, email and company, in
    /// insertion order.
    ///
    /// An empty or whitespace-only query matches nothing; a full dump goes
    /// through [`ClientStore::list_all_clients`] instead.
    pub fn search_clients(&self, query: &str) -> StoreResult<Vec<Client>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let _guard = self.guard();
        let collection = Collection::<Client>::load(&self.path)?;
        Ok(collection
            .records
            .into_iter()
            .filter(|c| c.matches(&needle))
            .collect())
    }

    /// Full collection in insertion order.
    pub fn list_all_clients(&self) -> StoreResult<Vec<Client>> {
        let _guard = self.guard();
        let collection = Collection::<Client>::load(&self.path)?;
        Ok(collection.records)
    }
}
