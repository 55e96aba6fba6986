use std::collections::BTreeMap;

use chrono::Utc;

use crate::dropdown::dropdown_model::DropdownConfig;
use crate::store::store_model::{DropdownStore, StoreError, StoredDropdown, UpsertOutcome};

/// In-process `dropdown_configs` table.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, StoredDropdown>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: BTreeMap<String, StoredDropdown>) -> Self {
        Self { records }
    }

    pub fn get(&self, dropdown_key: &str) -> Option<&StoredDropdown> {
        self.records.get(dropdown_key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &BTreeMap<String, StoredDropdown> {
        &self.records
    }
}

impl DropdownStore for MemoryStore {
    fn upsert(&mut self, config: &DropdownConfig) -> Result<UpsertOutcome, StoreError> {
        let now = Utc::now();
        match self.records.get_mut(&config.dropdown_key) {
            Some(existing) => {
                existing.replace_with(config, now);
                Ok(UpsertOutcome::Updated)
            }
            None => {
                self.records.insert(
                    config.dropdown_key.clone(),
                    StoredDropdown::from_config(config, now),
                );
                Ok(UpsertOutcome::Inserted)
            }
        }
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
