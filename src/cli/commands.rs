use std::path::Path;

use crate::classify::classifier::Classifier;
use crate::cli::config::{AppConfig, MigrateSettings, resolve_variant};
use crate::content::content_model::ComponentType;
use crate::content::source::{eligible, load_rows};
use crate::dropdown::aggregator::AggregateOptions;
use crate::migrate::compare::compare_variants;
use crate::migrate::runner::{MigrationOptions, run_migration};
use crate::report::console::{format_console_report, format_variant_report};
use crate::store::store_model::StoreTarget;
use crate::trace::logger::AuditLogger;

// ============================================================================
// migrate subcommand
// ============================================================================

/// Run a migration and return whether every dropdown reached the store.
pub fn cmd_migrate(settings: &MigrateSettings) -> Result<bool, Box<dyn std::error::Error>> {
    let rows = load_rows(&settings.input)?;
    let classifier = Classifier::new(settings.tables.clone(), settings.variant)?;

    let target = if settings.dry_run {
        StoreTarget::Memory
    } else {
        StoreTarget::parse(&settings.store)?
    };
    let mut store = target.open()?;

    let audit = match &settings.audit_log {
        Some(path) => AuditLogger::new(path),
        None => AuditLogger::disabled(),
    };

    let options = MigrationOptions {
        dry_run: settings.dry_run,
        eligible_statuses: settings.eligible_statuses.clone(),
        aggregate: AggregateOptions {
            source_label: settings.source_label.clone(),
            ..AggregateOptions::default()
        },
    };

    let report = run_migration(rows, &classifier, store.as_mut(), &options, &audit)?;

    if let Some(path) = &settings.report {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "wrote migration report");
    }

    print!("{}", format_console_report(&report));
    Ok(report.all_succeeded())
}

// ============================================================================
// classify subcommand
// ============================================================================

pub fn cmd_classify(
    key: &str,
    component: &str,
    screen: &str,
    variant: Option<&str>,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let component = ComponentType::parse(component)
        .ok_or_else(|| format!("unknown component type '{}'", component))?;
    let variant = resolve_variant(variant, config)?;
    let classifier = Classifier::new(config.classifier_tables(), variant)?;

    let classification = classifier.classify(key, component, screen);
    println!("{}", serde_json::to_string_pretty(&classification)?);
    Ok(())
}

// ============================================================================
// compare subcommand
// ============================================================================

pub fn cmd_compare(input: &str, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let rows = eligible(load_rows(Path::new(input))?, &config.eligible_statuses);
    let disagreements = compare_variants(&rows, &config.classifier_tables())?;
    print!("{}", format_variant_report(&disagreements));
    Ok(())
}
