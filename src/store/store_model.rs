use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dropdown::dropdown_model::{DropdownConfig, DropdownDocument};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot access store file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("store file {path} is not a dropdown table: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot encode dropdown {key}: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },

    #[error("request for {key} failed: {source}")]
    Http {
        key: String,
        source: reqwest::Error,
    },

    #[error("store rejected {key} with status {status}: {body}")]
    Rejected {
        key: String,
        status: u16,
        body: String,
    },

    #[error("unrecognized store target '{0}' (expected memory, file:<path> or an http(s) URL)")]
    InvalidTarget(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Row of the `dropdown_configs` target table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDropdown {
    pub dropdown_key: String,
    pub screen_location: String,
    pub field_name: String,
    pub category: String,
    pub dropdown_data: DropdownDocument,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredDropdown {
    pub fn from_config(config: &DropdownConfig, now: DateTime<Utc>) -> Self {
        Self {
            dropdown_key: config.dropdown_key.clone(),
            screen_location: config.screen_location.clone(),
            field_name: config.field_name.clone(),
            category: config.category.clone(),
            dropdown_data: config.document(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Conflict policy: replace the whole document and bump `updated_at`;
    /// `created_at` survives.
    pub fn replace_with(&mut self, config: &DropdownConfig, now: DateTime<Utc>) {
        let created_at = self.created_at;
        *self = Self::from_config(config, now);
        self.created_at = created_at;
    }
}

// ============================================================================
// DropdownStore trait: the output boundary
// ============================================================================

/// Target store keyed uniquely by `dropdown_key`.
///
/// Each `upsert` stands alone: a failure on one key must leave the store
/// usable for the next.
pub trait DropdownStore {
    fn upsert(&mut self, config: &DropdownConfig) -> Result<UpsertOutcome, StoreError>;

    /// Flush buffered writes. Called once after the last upsert.
    fn finish(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    fn describe(&self) -> String;
}

/// Parsed `--store` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    Memory,
    File(PathBuf),
    Http(String),
}

impl StoreTarget {
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("memory") {
            Ok(StoreTarget::Memory)
        } else if let Some(path) = raw.strip_prefix("file:") {
            if path.is_empty() {
                return Err(StoreError::InvalidTarget(raw.to_string()));
            }
            Ok(StoreTarget::File(PathBuf::from(path)))
        } else if raw.starts_with("http://") || raw.starts_with("https://") {
            Ok(StoreTarget::Http(raw.trim_end_matches('/').to_string()))
        } else {
            Err(StoreError::InvalidTarget(raw.to_string()))
        }
    }

    pub fn open(&self) -> Result<Box<dyn DropdownStore>, StoreError> {
        match self {
            StoreTarget::Memory => Ok(Box::new(crate::store::memory::MemoryStore::new())),
            StoreTarget::File(path) => Ok(Box::new(
                crate::store::json_file::JsonFileStore::open(path)?,
            )),
            StoreTarget::Http(url) => Ok(Box::new(crate::store::http::HttpStore::new(url))),
        }
    }
}
