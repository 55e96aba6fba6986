use serde::{Deserialize, Serialize};

use crate::dropdown::diagnostics::AggregationDiagnostics;
use crate::store::store_model::UpsertOutcome;

// ============================================================================
// Migration report: one run, every key accounted for
// ============================================================================

/// A dropdown the store refused; the run continued without it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedUpsert {
    pub dropdown_key: String,
    pub error: String,
}

/// Per-key store outcome, in upsert order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertRecord {
    pub dropdown_key: String,
    pub outcome: UpsertOutcome,
    pub option_count: usize,
}

/// Aggregated result of one migration run.
///
/// Built by `run_migration`; consumed by the console reporter and written
/// as JSON with `--report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationReport {
    /// Pattern variant the classifier used
    pub variant: String,

    /// Store description (`memory`, `file:<path>`, base URL)
    pub store: String,

    pub dry_run: bool,

    /// Rows read from the export
    pub total_rows: usize,

    /// Rows left after the status / activity / component filter
    pub eligible_rows: usize,

    /// Dropdowns produced by aggregation
    pub dropdowns: usize,

    pub inserted: usize,
    pub updated: usize,

    pub upserts: Vec<UpsertRecord>,
    pub failed: Vec<FailedUpsert>,

    pub diagnostics: AggregationDiagnostics,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,
}

impl MigrationReport {
    pub fn new(variant: &str, store: &str, dry_run: bool) -> Self {
        Self {
            variant: variant.to_string(),
            store: store.to_string(),
            dry_run,
            total_rows: 0,
            eligible_rows: 0,
            dropdowns: 0,
            inserted: 0,
            updated: 0,
            upserts: Vec::new(),
            failed: Vec::new(),
            diagnostics: AggregationDiagnostics::default(),
            duration_ms: None,
        }
    }

    pub fn record(&mut self, dropdown_key: &str, outcome: UpsertOutcome, option_count: usize) {
        match outcome {
            UpsertOutcome::Inserted => self.inserted += 1,
            UpsertOutcome::Updated => self.updated += 1,
        }
        self.upserts.push(UpsertRecord {
            dropdown_key: dropdown_key.to_string(),
            outcome,
            option_count,
        });
    }

    pub fn record_failure(&mut self, dropdown_key: &str, error: impl ToString) {
        self.failed.push(FailedUpsert {
            dropdown_key: dropdown_key.to_string(),
            error: error.to_string(),
        });
    }

    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Whether every dropdown reached the store.
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}
