use std::path::Path;

use crate::{
    classify::{classifier::Classifier, patterns::PatternVariant, tables::ClassifierTables},
    content::source::{SourceError, load_rows},
    dropdown::aggregator::{AggregateOptions, Aggregation, aggregate},
};

pub mod classify;
pub mod cli;
pub mod content;
pub mod dropdown;
pub mod migrate;
pub mod report;
pub mod store;
pub mod trace;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Pattern(#[from] classify::patterns::PatternError),
}

/// Load an export, keep eligible rows and aggregate them with default
/// tables. Convenience entry point for scripts and tests; the CLI goes
/// through `migrate::runner` instead.
pub fn aggregate_export(
    path: &Path,
    variant: PatternVariant,
) -> Result<Aggregation, PipelineError> {
    let tables = ClassifierTables::default();
    let classifier = Classifier::new(tables, variant)?;
    let statuses = ["approved".to_string(), "active".to_string()];
    let rows = content::source::eligible(load_rows(path)?, &statuses);
    Ok(aggregate(&rows, &classifier, &AggregateOptions::default()))
}
