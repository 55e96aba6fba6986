use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::classify::patterns::PatternVariant;
use crate::classify::tables::ClassifierTables;
use crate::dropdown::aggregator::DEFAULT_SOURCE_LABEL;

pub const DEFAULT_CONFIG_FILE: &str = "dropdown-migrate.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "dropdown-migrate",
    version,
    about = "Consolidate legacy dropdown translations into per-dropdown JSON documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: dropdown-migrate.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Migrate exported content rows into the dropdown store
    Migrate {
        /// Content export: JSON array, .jsonl file, or a directory of them
        #[arg(long)]
        input: String,

        /// Target store: memory, file:<path>, or an http(s) base URL
        #[arg(long)]
        store: Option<String>,

        /// Pattern variant: consolidated or railway
        #[arg(long)]
        variant: Option<String>,

        /// Aggregate and report without writing to the store
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Write the full migration report as JSON to this path
        #[arg(long)]
        report: Option<String>,

        /// Append low-confidence mappings and failures to this JSONL file
        #[arg(long)]
        audit_log: Option<String>,
    },

    /// Classify a single content key and print the result as JSON
    Classify {
        /// Legacy content key
        #[arg(long)]
        key: String,

        /// Component type: container, label, placeholder, option
        #[arg(long, default_value = "label")]
        component: String,

        /// Screen location the key belongs to
        #[arg(long, default_value = "")]
        screen: String,

        /// Pattern variant: consolidated or railway
        #[arg(long)]
        variant: Option<String>,
    },

    /// List keys the two pattern variants resolve differently
    Compare {
        /// Content export: JSON array, .jsonl file, or a directory of them
        #[arg(long)]
        input: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `dropdown-migrate.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Overrides `tables.languages` when set
    #[serde(default)]
    pub languages: Option<Vec<String>>,

    #[serde(default = "default_statuses")]
    pub eligible_statuses: Vec<String>,

    #[serde(default)]
    pub variant: PatternVariant,

    #[serde(default = "default_store")]
    pub store: String,

    #[serde(default)]
    pub audit_log: Option<String>,

    #[serde(default = "default_source_label")]
    pub source_label: String,

    #[serde(default)]
    pub tables: ClassifierTables,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            languages: None,
            eligible_statuses: default_statuses(),
            variant: PatternVariant::default(),
            store: default_store(),
            audit_log: None,
            source_label: default_source_label(),
            tables: ClassifierTables::default(),
        }
    }
}

impl AppConfig {
    /// Classifier tables with the top-level `languages` override applied.
    pub fn classifier_tables(&self) -> ClassifierTables {
        let mut tables = self.tables.clone();
        if let Some(languages) = &self.languages {
            tables.languages = languages.clone();
        }
        tables
    }
}

// Serde default helpers
fn default_statuses() -> Vec<String> { vec!["approved".to_string(), "active".to_string()] }
fn default_store() -> String { "file:dropdown_configs.json".to_string() }
fn default_source_label() -> String { DEFAULT_SOURCE_LABEL.to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if the file is missing;
/// a malformed file is reported and also yields defaults.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(config_path) {
        Ok(content) => match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = config_path, error = %e, "ignoring malformed config file");
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    }
}

/// `tracing` filter for a `-v` count: warn, info, debug, trace.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

// ============================================================================
// Settings builders (merge CLI args with config file: CLI > config > defaults)
// ============================================================================

/// Fully resolved settings for the `migrate` subcommand.
#[derive(Debug, Clone)]
pub struct MigrateSettings {
    pub input: PathBuf,
    pub store: String,
    pub variant: PatternVariant,
    pub dry_run: bool,
    pub report: Option<PathBuf>,
    pub audit_log: Option<PathBuf>,
    pub eligible_statuses: Vec<String>,
    pub source_label: String,
    pub tables: ClassifierTables,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown pattern variant '{0}' (expected consolidated or railway)")]
pub struct UnknownVariant(pub String);

pub fn resolve_variant(
    cli: Option<&str>,
    config: &AppConfig,
) -> Result<PatternVariant, UnknownVariant> {
    match cli {
        Some(raw) => PatternVariant::parse(raw).ok_or_else(|| UnknownVariant(raw.to_string())),
        None => Ok(config.variant),
    }
}

pub fn build_migrate_settings(
    input: &str,
    store: Option<&str>,
    variant: Option<&str>,
    dry_run: bool,
    report: Option<&str>,
    audit_log: Option<&str>,
    config: &AppConfig,
) -> Result<MigrateSettings, UnknownVariant> {
    Ok(MigrateSettings {
        input: PathBuf::from(input),
        store: store.unwrap_or(&config.store).to_string(),
        variant: resolve_variant(variant, config)?,
        dry_run,
        report: report.map(PathBuf::from),
        audit_log: audit_log
            .map(PathBuf::from)
            .or_else(|| config.audit_log.as_ref().map(PathBuf::from)),
        eligible_statuses: config.eligible_statuses.clone(),
        source_label: config.source_label.clone(),
        tables: config.classifier_tables(),
    })
}
