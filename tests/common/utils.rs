use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use dropdown_migrate::{
    classify::{classifier::Classifier, patterns::PatternVariant, tables::ClassifierTables},
    content::content_model::{ComponentType, ContentRow},
    dropdown::aggregator::AggregateOptions,
};

pub fn row(
    key: &str,
    component: ComponentType,
    screen: &str,
    lang: &str,
    value: &str,
) -> ContentRow {
    ContentRow::new(key, component, screen, lang, value)
}

pub fn consolidated() -> Classifier {
    Classifier::new(ClassifierTables::default(), PatternVariant::Consolidated).unwrap()
}

pub fn railway() -> Classifier {
    Classifier::new(ClassifierTables::default(), PatternVariant::Railway).unwrap()
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 6, 10, 20, 0).unwrap()
}

pub fn fixed_options() -> AggregateOptions {
    AggregateOptions {
        generated_at: fixed_time(),
        source_label: "test_migration".to_string(),
    }
}

/// Unique path under the system temp dir; removes any leftover first.
pub fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "dropdown_migrate_{}_{}",
        std::process::id(),
        name
    ));
    if path.is_dir() {
        let _ = std::fs::remove_dir_all(&path);
    } else {
        let _ = std::fs::remove_file(&path);
    }
    path
}

/// The property-ownership dropdown of mortgage step 1 in all three languages.
pub fn property_ownership_rows() -> Vec<ContentRow> {
    use ComponentType::*;
    let screen = "mortgage_step1";
    vec![
        row(
            "mortgage_step1.field.property_ownership",
            Container,
            screen,
            "en",
            "Property Ownership",
        ),
        row("mortgage_step1.field.property_ownership", Container, screen, "he", "בעלות על נכס"),
        row(
            "mortgage_step1.field.property_ownership",
            Container,
            screen,
            "ru",
            "Владение недвижимостью",
        ),
        row(
            "mortgage_step1.field.property_ownership_ph",
            Placeholder,
            screen,
            "en",
            "Select your property status",
        ),
        row(
            "mortgage_step1.field.property_ownership_no_property",
            Option,
            screen,
            "en",
            "I don't own any property",
        ),
        row(
            "mortgage_step1.field.property_ownership_has_property",
            Option,
            screen,
            "en",
            "I own a property",
        ),
        row(
            "mortgage_step1.field.property_ownership_selling_property",
            Option,
            screen,
            "en",
            "I'm selling a property",
        ),
        row(
            "mortgage_step1.field.property_ownership_has_property",
            Option,
            screen,
            "he",
            "יש לי נכס",
        ),
    ]
}
