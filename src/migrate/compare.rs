use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::classify::classifier::{Classification, Classifier, effective_component};
use crate::classify::patterns::{PatternError, PatternVariant};
use crate::classify::tables::ClassifierTables;
use crate::content::content_model::ContentRow;

/// What one pattern variant made of a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantResolution {
    pub field_name: String,
    pub option_slot: Option<String>,
    pub pattern: String,
}

impl From<&Classification> for VariantResolution {
    fn from(c: &Classification) -> Self {
        Self {
            field_name: c.field_name.clone(),
            option_slot: c.option_slot.clone(),
            pattern: c.pattern.to_string(),
        }
    }
}

/// A key the two historical pattern lists resolve differently. Reported as a
/// data-quality risk; neither side is assumed correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDisagreement {
    pub content_key: String,
    pub component_type: String,
    pub screen_location: String,
    pub consolidated: VariantResolution,
    pub railway: VariantResolution,
}

/// Classify every distinct `(key, role, screen)` with both variants and list
/// the keys where field name or option slot differ.
pub fn compare_variants(
    rows: &[ContentRow],
    tables: &ClassifierTables,
) -> Result<Vec<VariantDisagreement>, PatternError> {
    let consolidated = Classifier::new(tables.clone(), PatternVariant::Consolidated)?;
    let railway = Classifier::new(tables.clone(), PatternVariant::Railway)?;

    let mut seen = HashSet::new();
    let mut disagreements = Vec::new();

    for row in rows {
        let role = effective_component(&row.content_key, row.component_type);
        if !seen.insert((row.content_key.as_str(), role, row.screen_location.as_str())) {
            continue;
        }

        let a = consolidated.classify(&row.content_key, role, &row.screen_location);
        let b = railway.classify(&row.content_key, role, &row.screen_location);

        if a.field_name != b.field_name || a.option_slot != b.option_slot {
            disagreements.push(VariantDisagreement {
                content_key: row.content_key.clone(),
                component_type: role.as_str().to_string(),
                screen_location: row.screen_location.clone(),
                consolidated: VariantResolution::from(&a),
                railway: VariantResolution::from(&b),
            });
        }
    }

    disagreements.sort_by(|x, y| {
        x.screen_location
            .cmp(&y.screen_location)
            .then_with(|| x.content_key.cmp(&y.content_key))
    });

    tracing::info!(
        keys = seen.len(),
        disagreements = disagreements.len(),
        "compared pattern variants"
    );

    Ok(disagreements)
}
