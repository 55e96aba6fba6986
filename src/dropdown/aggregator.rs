use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::classify::classifier::{Classifier, SlotSource, effective_component};
use crate::classify::normalize::sanitize_identifier;
use crate::content::content_model::{ComponentType, ContentRow};
use crate::dropdown::builder::{CellWrite, DropdownBuilder, write_cell};
use crate::dropdown::diagnostics::{
    AggregationDiagnostics, BestEffortSlot, Cell, CellConflict, FallbackMapping,
};
use crate::dropdown::dropdown_model::DropdownConfig;

pub const DEFAULT_SOURCE_LABEL: &str = "legacy_content_migration";

#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Timestamp stamped into every dropdown's metadata
    pub generated_at: DateTime<Utc>,

    /// `metadata.source` value
    pub source_label: String,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            generated_at: Utc::now(),
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
        }
    }
}

/// Finished dropdowns (sorted by `dropdown_key`) plus what went wrong on the way.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub dropdowns: Vec<DropdownConfig>,
    pub diagnostics: AggregationDiagnostics,
}

pub fn dropdown_key(screen_location: &str, field_name: &str) -> String {
    format!(
        "{}_{}",
        sanitize_identifier(screen_location),
        sanitize_identifier(field_name)
    )
}

/// Fold eligible content rows into one `DropdownConfig` per `(screen, field)`.
///
/// Rows are applied in input order; when two rows write different values to
/// the same cell the later one wins and a `CellConflict` is recorded.
pub fn aggregate(
    rows: &[ContentRow],
    classifier: &Classifier,
    options: &AggregateOptions,
) -> Aggregation {
    let tables = classifier.tables();
    let mut builders: HashMap<String, DropdownBuilder> = HashMap::new();
    let mut diagnostics = AggregationDiagnostics::default();
    let mut seen_fallbacks: HashSet<(String, String)> = HashSet::new();
    let mut seen_best_effort: HashSet<(String, String)> = HashSet::new();

    for row in rows {
        diagnostics.rows_seen += 1;

        if !row.component_type.is_dropdown_part() {
            diagnostics.ignored_components += 1;
            continue;
        }

        if !tables.supports_language(&row.language_code) {
            tracing::debug!(
                key = %row.content_key,
                language = %row.language_code,
                "skipping row in unsupported language"
            );
            diagnostics.unsupported_languages += 1;
            continue;
        }

        let role = effective_component(&row.content_key, row.component_type);
        let classification =
            classifier.classify(&row.content_key, role, &row.screen_location);
        let key = dropdown_key(&row.screen_location, &classification.field_name);

        if classification.is_fallback()
            && seen_fallbacks.insert((row.content_key.clone(), row.screen_location.clone()))
        {
            tracing::warn!(
                key = %row.content_key,
                screen = %row.screen_location,
                field = %classification.field_name,
                "no pattern matched content key, using sanitized key"
            );
            diagnostics.fallback_mappings.push(FallbackMapping {
                content_key: row.content_key.clone(),
                screen_location: row.screen_location.clone(),
                field_name: classification.field_name.clone(),
            });
        }

        let builder = builders.entry(key.clone()).or_insert_with(|| {
            DropdownBuilder::new(
                &key,
                &row.screen_location,
                &classification.field_name,
                &tables.languages,
            )
        });
        builder.record_source(&row.content_key, classification.is_fallback());
        if builder.category.is_none() {
            builder.category = row.category.clone();
        }

        let (cell, text) = match role {
            ComponentType::Option => {
                let slot = classification.option_slot.clone().unwrap_or_default();
                if classification.slot_source == Some(SlotSource::LastToken)
                    && seen_best_effort.insert((row.content_key.clone(), key.clone()))
                {
                    diagnostics.best_effort_slots.push(BestEffortSlot {
                        content_key: row.content_key.clone(),
                        dropdown_key: key.clone(),
                        slot: slot.clone(),
                    });
                }
                let option = builder.option_mut(&slot);
                let Some(value) = row.text() else {
                    diagnostics.blank_values += 1;
                    continue;
                };
                (
                    Cell::Option { slot },
                    write_cell(&mut option.text, &row.language_code, value),
                )
            }
            ComponentType::Placeholder => {
                let Some(value) = row.text() else {
                    diagnostics.blank_values += 1;
                    continue;
                };
                (
                    Cell::Placeholder,
                    write_cell(&mut builder.placeholder, &row.language_code, value),
                )
            }
            _ => {
                let Some(value) = row.text() else {
                    diagnostics.blank_values += 1;
                    continue;
                };
                (
                    Cell::Label,
                    write_cell(&mut builder.label, &row.language_code, value),
                )
            }
        };

        diagnostics.rows_folded += 1;

        if let CellWrite::Overwritten { previous } = text {
            tracing::warn!(
                dropdown = %key,
                cell = %cell,
                language = %row.language_code,
                key = %row.content_key,
                "conflicting values for one cell, keeping the later row"
            );
            diagnostics.conflicts.push(CellConflict {
                dropdown_key: key,
                cell,
                language: row.language_code.clone(),
                previous,
                replacement: row.text().unwrap_or_default().to_string(),
                content_key: row.content_key.clone(),
            });
        }
    }

    let mut dropdowns: Vec<DropdownConfig> = builders
        .into_values()
        .map(|b| b.finish(&options.source_label, options.generated_at))
        .collect();
    dropdowns.sort_by(|a, b| a.dropdown_key.cmp(&b.dropdown_key));

    tracing::info!(
        rows = diagnostics.rows_seen,
        dropdowns = dropdowns.len(),
        fallbacks = diagnostics.fallback_mappings.len(),
        conflicts = diagnostics.conflicts.len(),
        "aggregated content rows"
    );

    Aggregation {
        dropdowns,
        diagnostics,
    }
}
