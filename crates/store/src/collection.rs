//! Generic file-backed collection document.
//!
//! Both stores persist the same shape: `{ "records": [...], "next_id": N }`.
//! Loading repairs a missing or stale counter so ID monotonicity survives
//! restarts; saving is write-new-then-rename so no partial write is ever
//! visible at the target path.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{StoreError, StoreResult};

/// A persisted record with an integer identity.
pub trait Record {
    fn record_id(&self) -> u64;
}

/// On-disk collection: insertion-ordered records plus the ID counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    pub records: Vec<T>,
    /// Next ID to allocate. Defaults to 0 on load when absent and is then
    /// repaired to max existing ID + 1.
    #[serde(default)]
    pub next_id: u64,
}

impl<T> Collection<T> {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T: Record> Collection<T> {
    fn max_id(&self) -> u64 {
        self.records.iter().map(Record::record_id).max().unwrap_or(0)
    }

    /// Raise `next_id` to max existing ID + 1 if it is missing or behind.
    ///
    /// The counter is only ever raised; a counter ahead of the records is
    /// legitimate (IDs are never reused).
    fn repair_counter(&mut self, path: &Path) {
        let floor = self.max_id() + 1;
        if self.next_id < floor {
            warn!(
                path = %path.display(),
                stored = self.next_id,
                repaired = floor,
                "stale ID counter in store file, repairing"
            );
            self.next_id = floor;
        }
    }

    /// Allocate the next sequential ID and advance the counter.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl<T: Record + DeserializeOwned> Collection<T> {
    /// Load the collection from `path`.
    ///
    /// A missing file is an empty collection (first run); an unparseable
    /// file is [`StoreError::Corrupt`].
    pub fn load(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            return Ok(Self::empty());
        }
        let raw = fs::read_to_string(path).map_err(|source| StoreError::io(path, source))?;
        let mut collection: Self = serde_json::from_str(&raw).map_err(|source| {
            StoreError::Corrupt {
                path: path.to_path_buf(),
                source,
            }
        })?;
        collection.repair_counter(path);
        Ok(collection)
    }
}

impl<T: Serialize> Collection<T> {
    /// Persist the collection to `path`.
    ///
    /// Serializes to a sibling temp file, then renames over the target, so
    /// either the write fully succeeds or the prior state remains intact.
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::io(parent, source))?;
            }
        }

        let body = serde_json::to_string_pretty(self).map_err(|source| StoreError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = std::path::PathBuf::from(tmp);

        fs::write(&tmp, body).map_err(|source| StoreError::io(&tmp, source))?;
        fs::rename(&tmp, path).map_err(|source| StoreError::io(path, source))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: u64,
        label: String,
    }

    impl Record for Row {
        fn record_id(&self) -> u64 {
            self.id
        }
    }

    fn row(id: u64) -> Row {
        Row {
            id,
            label: format!("row-{id}"),
        }
    }

    #[test]
    fn empty_collection_starts_counting_at_one() {
        let mut collection = Collection::<Row>::empty();
        assert_eq!(collection.allocate_id(), 1);
        assert_eq!(collection.allocate_id(), 2);
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let collection = Collection::<Row>::load(&dir.path().join("absent.json")).unwrap();
        assert!(collection.records.is_empty());
        assert_eq!(collection.next_id, 1);
    }

    #[test]
    fn save_then_load_round_trips_records_and_counter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");

        let mut collection = Collection::<Row>::empty();
        for _ in 0..3 {
            let id = collection.allocate_id();
            collection.records.push(row(id));
        }
        collection.save(&path).unwrap();

        let reloaded = Collection::<Row>::load(&path).unwrap();
        assert_eq!(reloaded, collection);
        assert_eq!(reloaded.next_id, 4);
    }

    #[test]
    fn stale_counter_is_repaired_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(
            &path,
            r#"{"records":[{"id":1,"label":"a"},{"id":7,"label":"b"}],"next_id":2}"#,
        )
        .unwrap();

        let mut collection = Collection::<Row>::load(&path).unwrap();
        assert_eq!(collection.next_id, 8);
        assert_eq!(collection.allocate_id(), 8);
    }

    #[test]
    fn missing_counter_is_recomputed_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, r#"{"records":[{"id":4,"label":"a"}]}"#).unwrap();

        let collection = Collection::<Row>::load(&path).unwrap();
        assert_eq!(collection.next_id, 5);
    }

    #[test]
    fn counter_ahead_of_records_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, r#"{"records":[{"id":1,"label":"a"}],"next_id":10}"#).unwrap();

        let collection = Collection::<Row>::load(&path).unwrap();
        assert_eq!(collection.next_id, 10);
    }

    #[test]
    fn corrupt_file_surfaces_corrupt_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Collection::<Row>::load(&path).unwrap_err();
        match err {
            StoreError::Corrupt { .. } => {}
            other => panic!("Expected Corrupt error, got {other:?}"),
        }
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");

        let collection = Collection::<Row>::empty();
        collection.save(&path).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("rows.json")]);
    }
}
