use crate::classify::classifier::Classifier;
use crate::content::content_model::ContentRow;
use crate::content::source::eligible;
use crate::dropdown::aggregator::{AggregateOptions, aggregate};
use crate::report::report_model::MigrationReport;
use crate::store::store_model::{DropdownStore, StoreError};
use crate::trace::logger::AuditLogger;
use crate::trace::trace::{AuditEvent, AuditKind};

#[derive(Debug, Clone)]
pub struct MigrationOptions {
    /// Aggregate and report, but do not touch the store
    pub dry_run: bool,

    /// Translation statuses that count as approved
    pub eligible_statuses: Vec<String>,

    pub aggregate: AggregateOptions,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            eligible_statuses: vec!["approved".to_string(), "active".to_string()],
            aggregate: AggregateOptions::default(),
        }
    }
}

/// Filter, classify, aggregate and upsert one export of content rows.
///
/// Every dropdown is upserted independently; a failing key is recorded in
/// the report and the run moves on. Only a failure to flush the store at
/// the end is returned as an error.
pub fn run_migration(
    rows: Vec<ContentRow>,
    classifier: &Classifier,
    store: &mut dyn DropdownStore,
    options: &MigrationOptions,
    audit: &AuditLogger,
) -> Result<MigrationReport, StoreError> {
    let start = std::time::Instant::now();
    let mut report = MigrationReport::new(
        classifier.variant().as_str(),
        &store.describe(),
        options.dry_run,
    );

    report.total_rows = rows.len();
    let rows = eligible(rows, &options.eligible_statuses);
    report.eligible_rows = rows.len();

    tracing::info!(
        total = report.total_rows,
        eligible = report.eligible_rows,
        variant = classifier.variant().as_str(),
        "starting dropdown migration"
    );

    let aggregation = aggregate(&rows, classifier, &options.aggregate);
    report.dropdowns = aggregation.dropdowns.len();

    for mapping in &aggregation.diagnostics.fallback_mappings {
        audit.log(&AuditEvent::fallback(mapping));
    }
    for conflict in &aggregation.diagnostics.conflicts {
        audit.log(&AuditEvent::conflict(conflict));
    }
    for slot in &aggregation.diagnostics.best_effort_slots {
        audit.log(&AuditEvent::best_effort(slot));
    }

    if options.dry_run {
        tracing::info!(dropdowns = report.dropdowns, "dry run, store left untouched");
    } else {
        for dropdown in &aggregation.dropdowns {
            match store.upsert(dropdown) {
                Ok(outcome) => {
                    tracing::debug!(key = %dropdown.dropdown_key, ?outcome, "upserted dropdown");
                    report.record(&dropdown.dropdown_key, outcome, dropdown.options.len());
                }
                Err(e) => {
                    tracing::error!(key = %dropdown.dropdown_key, error = %e, "upsert failed");
                    audit.log(
                        &AuditEvent::now(AuditKind::UpsertFailed)
                            .with_dropdown(&dropdown.dropdown_key)
                            .with_screen(&dropdown.screen_location)
                            .with_detail(&e),
                    );
                    report.record_failure(&dropdown.dropdown_key, &e);
                }
            }
        }
        store.finish()?;
    }

    report.diagnostics = aggregation.diagnostics;

    tracing::info!(
        inserted = report.inserted,
        updated = report.updated,
        failed = report.failed.len(),
        "dropdown migration finished"
    );

    Ok(report.with_duration(start.elapsed().as_millis()))
}
