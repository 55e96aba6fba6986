use serde::Serialize;

use crate::classify::normalize::{
    ends_with_token, is_placeholder_key, last_token, numbered_option, sanitize_identifier,
    strip_role_suffixes,
};
use crate::classify::patterns::{FieldPattern, PatternError, PatternVariant};
use crate::classify::tables::ClassifierTables;
use crate::content::content_model::ComponentType;

/// Field name used when a key sanitizes to nothing at all.
pub const UNNAMED_FIELD: &str = "unnamed_field";

/// Pattern name reported for keys no pattern recognized.
pub const FALLBACK_PATTERN: &str = "fallback";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// A structural pattern recognized the key
    Matched,
    /// No pattern matched; the sanitized raw key is the field name
    Fallback,
}

/// How an option slot was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotSource {
    /// Explicit `_option_<N>` suffix
    Numbered,
    /// Semantic suffix lookup table
    Semantic,
    /// Last `_` token of the key, best effort
    LastToken,
}

/// Where one content row belongs: its logical field and, for options, its slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub field_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_slot: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_source: Option<SlotSource>,

    pub pattern: &'static str,
    pub confidence: Confidence,
}

impl Classification {
    pub fn is_fallback(&self) -> bool {
        self.confidence == Confidence::Fallback
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Maps legacy content keys onto `(field, slot)` addresses.
///
/// Holds the ordered strategy table of one `PatternVariant` plus the injected
/// `ClassifierTables`. Classification is total: every key yields a non-empty
/// field name, unmatched keys degrade to their sanitized form.
pub struct Classifier {
    variant: PatternVariant,
    tables: ClassifierTables,
    patterns: Vec<Box<dyn FieldPattern>>,
    slot_suffixes: Vec<(String, String)>,
}

impl Classifier {
    pub fn new(tables: ClassifierTables, variant: PatternVariant) -> Result<Self, PatternError> {
        let patterns = variant.patterns(&tables)?;
        let slot_suffixes = tables.slot_suffixes_longest_first();
        Ok(Self {
            variant,
            tables,
            patterns,
            slot_suffixes,
        })
    }

    pub fn variant(&self) -> PatternVariant {
        self.variant
    }

    pub fn tables(&self) -> &ClassifierTables {
        &self.tables
    }

    pub fn pattern_names(&self) -> Vec<&'static str> {
        self.patterns.iter().map(|p| p.name()).collect()
    }

    /// Classify one content key. `_screen_location` is accepted for contract
    /// symmetry with the read query; the key alone decides the field.
    pub fn classify(
        &self,
        content_key: &str,
        component_type: ComponentType,
        _screen_location: &str,
    ) -> Classification {
        let base = strip_role_suffixes(content_key, &self.tables.role_suffixes);

        let matched = self
            .patterns
            .iter()
            .find_map(|p| p.extract(&base).map(|field| (p.name(), field)));

        let (pattern, field_name, confidence) = match matched {
            Some((name, field)) => (name, field, Confidence::Matched),
            None => (
                FALLBACK_PATTERN,
                fallback_field_name(content_key),
                Confidence::Fallback,
            ),
        };

        let (option_slot, slot_source) = if component_type == ComponentType::Option {
            let (slot, source) = self.option_slot(content_key);
            (Some(slot), Some(source))
        } else {
            (None, None)
        };

        Classification {
            field_name,
            option_slot,
            slot_source,
            pattern,
            confidence,
        }
    }

    /// Numbered suffix first, then the semantic table, then the last token.
    pub fn option_slot(&self, content_key: &str) -> (String, SlotSource) {
        if let Some(n) = numbered_option(content_key) {
            return (n.to_string(), SlotSource::Numbered);
        }

        if let Some((_, slot)) = self
            .slot_suffixes
            .iter()
            .find(|(suffix, _)| ends_with_token(content_key, suffix))
        {
            return (slot.clone(), SlotSource::Semantic);
        }

        let token = last_token(content_key);
        let slot = if token.is_empty() { "1" } else { token };
        (slot.to_string(), SlotSource::LastToken)
    }
}

/// Sanitized original key; never empty.
fn fallback_field_name(content_key: &str) -> String {
    let sanitized = sanitize_identifier(content_key);
    if sanitized.is_empty() {
        UNNAMED_FIELD.to_string()
    } else {
        sanitized
    }
}

// ============================================================================
// Role inference
// ============================================================================

/// The role a row actually plays once its key is taken into account.
///
/// Legacy rows are sometimes filed under the wrong type. A `_ph` key is a
/// placeholder whatever it was filed as; a `label`/`container` row with an
/// `_option_<N>` key is an option.
pub fn effective_component(content_key: &str, declared: ComponentType) -> ComponentType {
    match declared {
        ComponentType::Unsupported | ComponentType::Placeholder => declared,
        _ if is_placeholder_key(content_key) => ComponentType::Placeholder,
        ComponentType::Label | ComponentType::Container
            if numbered_option(content_key).is_some() =>
        {
            ComponentType::Option
        }
        other => other,
    }
}
