use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::classify::tables::ClassifierTables;

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("invalid {pattern} pattern: {source}")]
    Regex {
        pattern: &'static str,
        source: regex::Error,
    },
}

// ============================================================================
// FieldPattern trait: one entry of the ordered strategy table
// ============================================================================

/// Extracts a field name from a content key whose role suffixes have
/// already been stripped. Returns `None` when the key does not have this
/// pattern's shape.
pub trait FieldPattern {
    fn name(&self) -> &'static str;
    fn extract(&self, key: &str) -> Option<String>;
}

/// Which of the two historical pattern orderings to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternVariant {
    /// Dotted field (with value-suffix stripping), dropdown namespace,
    /// step screen, calculator prefix, two-segment fallback.
    #[default]
    Consolidated,

    /// Older ordering: dotted field without value stripping, calculator form,
    /// dropdown namespace, three-segment, step screen, two-segment.
    Railway,
}

impl PatternVariant {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "consolidated" | "all" | "default" => Some(PatternVariant::Consolidated),
            "railway" | "legacy" => Some(PatternVariant::Railway),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternVariant::Consolidated => "consolidated",
            PatternVariant::Railway => "railway",
        }
    }

    /// Build this variant's strategy table, in priority order.
    pub fn patterns(
        &self,
        tables: &ClassifierTables,
    ) -> Result<Vec<Box<dyn FieldPattern>>, PatternError> {
        let table: Vec<Box<dyn FieldPattern>> = match self {
            PatternVariant::Consolidated => vec![
                Box::new(DottedFieldPattern::with_value_suffixes(tables)?),
                Box::new(DropdownNamespacePattern::new()?),
                Box::new(StepScreenPattern::new()?),
                Box::new(CalculatorPattern::new(false)?),
                Box::new(SegmentPattern::two()?),
            ],
            PatternVariant::Railway => vec![
                Box::new(DottedFieldPattern::exact()?),
                Box::new(CalculatorPattern::new(true)?),
                Box::new(DropdownNamespacePattern::new()?),
                Box::new(SegmentPattern::three()?),
                Box::new(StepScreenPattern::new()?),
                Box::new(SegmentPattern::two()?),
            ],
        };
        Ok(table)
    }
}

fn compile(pattern: &'static str, source: &str) -> Result<Regex, PatternError> {
    Regex::new(source).map_err(|source| PatternError::Regex { pattern, source })
}

fn alternation(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|")
}

// ============================================================================
// a. <screen>.field.<field>[_<enumerated value>]
// ============================================================================

pub struct DottedFieldPattern {
    field: Regex,
    value_suffixes: Vec<Regex>,
}

impl DottedFieldPattern {
    /// Prefix match, followed by the value-suffix passes: numbered infix,
    /// whole value token, value-token prefix, sector token.
    pub fn with_value_suffixes(tables: &ClassifierTables) -> Result<Self, PatternError> {
        let mut value_suffixes = Vec::new();

        if !tables.numbered_value_suffixes.is_empty() {
            value_suffixes.push(compile(
                "numbered value suffix",
                &format!(
                    r"^([^.]+?)_[0-9]_(?:{})",
                    alternation(&tables.numbered_value_suffixes)
                ),
            )?);
        }
        let whole_tokens: Vec<String> = tables
            .value_suffixes
            .iter()
            .filter(|t| !t.ends_with('_'))
            .cloned()
            .collect();
        if !whole_tokens.is_empty() {
            // Lazy and anchored: strips the longest complete value token.
            value_suffixes.push(compile(
                "whole value suffix",
                &format!(r"^([^.]+?)_(?:{})$", alternation(&whole_tokens)),
            )?);
        }
        if !tables.value_suffixes.is_empty() {
            value_suffixes.push(compile(
                "value suffix",
                &format!(r"^([^.]+)_(?:{})", alternation(&tables.value_suffixes)),
            )?);
        }
        if !tables.sector_suffixes.is_empty() {
            value_suffixes.push(compile(
                "sector suffix",
                &format!(r"^([^.]+?)_(?:{})", alternation(&tables.sector_suffixes)),
            )?);
        }

        Ok(Self {
            field: compile("dotted field", r"^[^.]*\.field\.([^.]+)")?,
            value_suffixes,
        })
    }

    /// Whole-key match, no value-suffix stripping.
    pub fn exact() -> Result<Self, PatternError> {
        Ok(Self {
            field: compile("dotted field", r"^[^.]+\.field\.([^.]+)$")?,
            value_suffixes: Vec::new(),
        })
    }
}

impl FieldPattern for DottedFieldPattern {
    fn name(&self) -> &'static str {
        "dotted_field"
    }

    fn extract(&self, key: &str) -> Option<String> {
        let field = self.field.captures(key)?.get(1)?.as_str();

        for suffix in &self.value_suffixes {
            if let Some(m) = suffix.captures(field).and_then(|c| c.get(1)) {
                return Some(m.as_str().to_string());
            }
        }
        Some(field.to_string())
    }
}

// ============================================================================
// b. app.<domain>.step<N>.dropdown.<field>
// ============================================================================

pub struct DropdownNamespacePattern {
    re: Regex,
}

impl DropdownNamespacePattern {
    pub fn new() -> Result<Self, PatternError> {
        Ok(Self {
            re: compile(
                "dropdown namespace",
                r"^app\.[^.]+\.step\d+\.dropdown\.([^.]+)$",
            )?,
        })
    }
}

impl FieldPattern for DropdownNamespacePattern {
    fn name(&self) -> &'static str {
        "dropdown_namespace"
    }

    fn extract(&self, key: &str) -> Option<String> {
        capture(&self.re, key, 1)
    }
}

// ============================================================================
// c. <screen>_step<N>_<field>
// ============================================================================

pub struct StepScreenPattern {
    re: Regex,
}

impl StepScreenPattern {
    pub fn new() -> Result<Self, PatternError> {
        Ok(Self {
            re: compile("step screen", r"^[^_]+_step\d+_([^_]+(?:_[^_]+)*)$")?,
        })
    }
}

impl FieldPattern for StepScreenPattern {
    fn name(&self) -> &'static str {
        "step_screen"
    }

    fn extract(&self, key: &str) -> Option<String> {
        capture(&self.re, key, 1)
    }
}

// ============================================================================
// d. [app.<domain>.form.]calculate_<domain>_<field>
// ============================================================================

pub struct CalculatorPattern {
    re: Regex,
    form_only: bool,
}

impl CalculatorPattern {
    /// `form_only` requires the `app.<domain>.form.` namespace.
    pub fn new(form_only: bool) -> Result<Self, PatternError> {
        let source = if form_only {
            r"^app\.[^.]+\.form\.calculate_[^_.]+_([^_.]+(?:_[^_.]+)*)$"
        } else {
            r"^(?:app\.[^.]+\.form\.)?calculate_[^_.]+_([^_.]+(?:_[^_.]+)*)$"
        };
        Ok(Self {
            re: compile("calculator", source)?,
            form_only,
        })
    }
}

impl FieldPattern for CalculatorPattern {
    fn name(&self) -> &'static str {
        if self.form_only {
            "calculator_form"
        } else {
            "calculator"
        }
    }

    fn extract(&self, key: &str) -> Option<String> {
        capture(&self.re, key, 1)
    }
}

// ============================================================================
// e. <a>.<b>  /  <a>.<b>.<c>
// ============================================================================

pub struct SegmentPattern {
    re: Regex,
    segments: usize,
}

impl SegmentPattern {
    pub fn two() -> Result<Self, PatternError> {
        Ok(Self {
            re: compile("two segment", r"^[^.]+\.([^.]+)$")?,
            segments: 2,
        })
    }

    pub fn three() -> Result<Self, PatternError> {
        Ok(Self {
            re: compile("three segment", r"^[^.]+\.[^.]+\.([^.]+)$")?,
            segments: 3,
        })
    }
}

impl FieldPattern for SegmentPattern {
    fn name(&self) -> &'static str {
        if self.segments == 3 {
            "three_segment"
        } else {
            "two_segment"
        }
    }

    fn extract(&self, key: &str) -> Option<String> {
        capture(&self.re, key, 1)
    }
}

fn capture(re: &Regex, key: &str, group: usize) -> Option<String> {
    re.captures(key)
        .and_then(|c| c.get(group))
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty())
}
