use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::dropdown::dropdown_model::{
    DEFAULT_CATEGORY, DropdownConfig, DropdownMetadata, DropdownOption, LocalizedText,
    content_fingerprint,
};

/// Outcome of writing one language cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellWrite {
    /// The cell was empty (pre-seeded default)
    Filled,
    /// The cell already held this exact value
    Unchanged,
    /// A different non-empty value was replaced
    Overwritten { previous: String },
}

/// Write `value` into `text[language]`, last write wins.
pub fn write_cell(text: &mut LocalizedText, language: &str, value: &str) -> CellWrite {
    let slot = text.entry(language.to_string()).or_default();
    let outcome = if slot.is_empty() {
        CellWrite::Filled
    } else if slot == value {
        CellWrite::Unchanged
    } else {
        CellWrite::Overwritten {
            previous: slot.clone(),
        }
    };
    *slot = value.to_string();
    outcome
}

fn seeded(languages: &[String]) -> LocalizedText {
    languages
        .iter()
        .map(|l| (l.clone(), String::new()))
        .collect()
}

// ============================================================================
// DropdownBuilder: in-progress dropdown during the fold
// ============================================================================

#[derive(Debug, Clone)]
pub struct DropdownBuilder {
    pub dropdown_key: String,
    pub screen_location: String,
    pub field_name: String,
    pub category: Option<String>,
    pub label: LocalizedText,
    pub placeholder: LocalizedText,
    pub options: Vec<DropdownOption>,
    languages: Vec<String>,
    original_keys: BTreeSet<String>,
    fallback_keys: BTreeSet<String>,
    source_rows: usize,
}

impl DropdownBuilder {
    pub fn new(
        dropdown_key: &str,
        screen_location: &str,
        field_name: &str,
        languages: &[String],
    ) -> Self {
        Self {
            dropdown_key: dropdown_key.to_string(),
            screen_location: screen_location.to_string(),
            field_name: field_name.to_string(),
            category: None,
            label: seeded(languages),
            placeholder: seeded(languages),
            options: Vec::new(),
            languages: languages.to_vec(),
            original_keys: BTreeSet::new(),
            fallback_keys: BTreeSet::new(),
            source_rows: 0,
        }
    }

    pub fn record_source(&mut self, content_key: &str, fallback: bool) {
        self.source_rows += 1;
        self.original_keys.insert(content_key.to_string());
        if fallback {
            self.fallback_keys.insert(content_key.to_string());
        }
    }

    /// Find or create the option for `slot`, its text pre-seeded per language.
    pub fn option_mut(&mut self, slot: &str) -> &mut DropdownOption {
        let idx = match self.options.iter().position(|o| o.value == slot) {
            Some(idx) => idx,
            None => {
                self.options.push(DropdownOption {
                    value: slot.to_string(),
                    text: seeded(&self.languages),
                });
                self.options.len() - 1
            }
        };
        &mut self.options[idx]
    }

    /// Seal the builder into a finished `DropdownConfig`.
    pub fn finish(mut self, source: &str, generated_at: DateTime<Utc>) -> DropdownConfig {
        for lang in &self.languages {
            self.label.entry(lang.clone()).or_default();
            self.placeholder.entry(lang.clone()).or_default();
            for option in &mut self.options {
                option.text.entry(lang.clone()).or_default();
            }
        }

        sort_options(&mut self.options);

        let content_hash = content_fingerprint(&self.label, &self.placeholder, &self.options);
        let metadata = DropdownMetadata {
            source: source.to_string(),
            generated_at,
            original_keys: self.original_keys.into_iter().collect(),
            source_row_count: self.source_rows,
            option_count: self.options.len(),
            fallback_key_count: self.fallback_keys.len(),
            content_hash,
        };

        DropdownConfig {
            dropdown_key: self.dropdown_key,
            screen_location: self.screen_location,
            field_name: self.field_name,
            category: self
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            label: self.label,
            placeholder: self.placeholder,
            options: self.options,
            metadata,
        }
    }
}

/// Numeric order when every slot is an integer, lexical order otherwise.
pub fn sort_options(options: &mut [DropdownOption]) {
    let numeric: Option<Vec<u64>> = options.iter().map(|o| o.value.parse().ok()).collect();

    if numeric.is_some() {
        options.sort_by(|a, b| {
            let na: u64 = a.value.parse().unwrap_or(0);
            let nb: u64 = b.value.parse().unwrap_or(0);
            na.cmp(&nb).then_with(|| a.value.cmp(&b.value))
        });
    } else {
        options.sort_by(|a, b| a.value.cmp(&b.value));
    }
}
