use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Language code → translated text. Ordered so serialized documents are stable.
pub type LocalizedText = BTreeMap<String, String>;

pub const DEFAULT_CATEGORY: &str = "dropdown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    /// Persisted option identifier (slot)
    pub value: String,
    pub text: LocalizedText,
}

/// Provenance recorded with every generated dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownMetadata {
    pub source: String,
    pub generated_at: DateTime<Utc>,

    /// Sorted, de-duplicated legacy content keys folded into this dropdown
    pub original_keys: Vec<String>,

    pub source_row_count: usize,
    pub option_count: usize,

    /// Keys that only reached this dropdown through the sanitized-key fallback
    pub fallback_key_count: usize,

    /// SHA-1 of the `{label, placeholder, options}` body
    pub content_hash: String,
}

/// One consolidated dropdown, keyed by `<screen>_<field>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownConfig {
    pub dropdown_key: String,
    pub screen_location: String,
    pub field_name: String,
    pub category: String,
    pub label: LocalizedText,
    pub placeholder: LocalizedText,
    pub options: Vec<DropdownOption>,
    pub metadata: DropdownMetadata,
}

/// The JSON document persisted in `dropdown_configs.dropdown_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownDocument {
    pub label: LocalizedText,
    pub placeholder: LocalizedText,
    pub options: Vec<DropdownOption>,
    pub metadata: DropdownMetadata,
}

impl DropdownConfig {
    pub fn document(&self) -> DropdownDocument {
        DropdownDocument {
            label: self.label.clone(),
            placeholder: self.placeholder.clone(),
            options: self.options.clone(),
            metadata: self.metadata.clone(),
        }
    }

    pub fn option(&self, value: &str) -> Option<&DropdownOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// Fingerprint of a dropdown body, independent of metadata and timestamps.
pub fn content_fingerprint(
    label: &LocalizedText,
    placeholder: &LocalizedText,
    options: &[DropdownOption],
) -> String {
    use sha1::{Digest, Sha1};

    #[derive(Serialize)]
    struct Body<'a> {
        label: &'a LocalizedText,
        placeholder: &'a LocalizedText,
        options: &'a [DropdownOption],
    }

    let bytes = serde_json::to_vec(&Body {
        label,
        placeholder,
        options,
    })
    .unwrap_or_default();

    let mut hasher = Sha1::new();
    hasher.update(&bytes);
    format!("{:x}", hasher.finalize())
}
