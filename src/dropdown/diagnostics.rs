use serde::{Deserialize, Serialize};

/// Which cell of a dropdown a row wrote to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    Label,
    Placeholder,
    Option { slot: String },
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Label => write!(f, "label"),
            Cell::Placeholder => write!(f, "placeholder"),
            Cell::Option { slot } => write!(f, "option {}", slot),
        }
    }
}

/// A key no structural pattern recognized; needs manual review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackMapping {
    pub content_key: String,
    pub screen_location: String,
    pub field_name: String,
}

/// Two rows wrote different non-empty values to the same cell; the later
/// row won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellConflict {
    pub dropdown_key: String,
    pub cell: Cell,
    pub language: String,
    pub previous: String,
    pub replacement: String,
    pub content_key: String,
}

/// An option whose slot came from the last key token, not a known suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestEffortSlot {
    pub content_key: String,
    pub dropdown_key: String,
    pub slot: String,
}

/// Data-quality findings of one aggregation pass. Nothing here is fatal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationDiagnostics {
    pub rows_seen: usize,
    pub rows_folded: usize,
    pub blank_values: usize,
    pub unsupported_languages: usize,
    pub ignored_components: usize,
    pub fallback_mappings: Vec<FallbackMapping>,
    pub conflicts: Vec<CellConflict>,
    pub best_effort_slots: Vec<BestEffortSlot>,
}

impl AggregationDiagnostics {
    pub fn has_warnings(&self) -> bool {
        !self.fallback_mappings.is_empty()
            || !self.conflicts.is_empty()
            || !self.best_effort_slots.is_empty()
    }
}
