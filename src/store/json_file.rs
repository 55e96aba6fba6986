use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::dropdown::dropdown_model::DropdownConfig;
use crate::store::memory::MemoryStore;
use crate::store::store_model::{DropdownStore, StoreError, StoredDropdown, UpsertOutcome};

/// `dropdown_configs` table persisted as one pretty-printed JSON object
/// keyed by `dropdown_key`.
///
/// The file is read on `open`, upserts go to memory, and `finish` rewrites
/// the file through a temporary sibling and a rename.
pub struct JsonFileStore {
    path: PathBuf,
    table: MemoryStore,
}

impl JsonFileStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let table = match std::fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => MemoryStore::new(),
            Ok(content) => {
                let records: BTreeMap<String, StoredDropdown> = serde_json::from_str(&content)
                    .map_err(|source| StoreError::Corrupt {
                        path: path.to_path_buf(),
                        source,
                    })?;
                MemoryStore::from_records(records)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => MemoryStore::new(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        tracing::debug!(
            path = %path.display(),
            existing = table.len(),
            "opened dropdown store file"
        );

        Ok(Self {
            path: path.to_path_buf(),
            table,
        })
    }

    pub fn records(&self) -> &BTreeMap<String, StoredDropdown> {
        self.table.records()
    }
}

impl DropdownStore for JsonFileStore {
    fn upsert(&mut self, config: &DropdownConfig) -> Result<UpsertOutcome, StoreError> {
        self.table.upsert(config)
    }

    fn finish(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self.table.records()).map_err(|source| {
            StoreError::Encode {
                key: "<table>".to_string(),
                source,
            }
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!(
            path = %self.path.display(),
            records = self.table.len(),
            "wrote dropdown store file"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
