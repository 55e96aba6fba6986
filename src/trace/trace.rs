use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dropdown::diagnostics::{BestEffortSlot, CellConflict, FallbackMapping};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    FallbackMapping,
    CellConflict,
    BestEffortSlot,
    UpsertFailed,
}

/// One line of the migration audit trail (JSONL).
#[derive(Debug, Serialize)]
pub struct AuditEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: AuditKind,

    pub dropdown_key: Option<String>,
    pub content_key: Option<String>,
    pub screen_location: Option<String>,

    pub detail: Option<String>,
}

impl AuditEvent {
    pub fn now(kind: AuditKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            dropdown_key: None,
            content_key: None,
            screen_location: None,
            detail: None,
        }
    }

    pub fn with_dropdown(mut self, dropdown_key: impl ToString) -> Self {
        self.dropdown_key = Some(dropdown_key.to_string());
        self
    }

    pub fn with_content_key(mut self, content_key: impl ToString) -> Self {
        self.content_key = Some(content_key.to_string());
        self
    }

    pub fn with_screen(mut self, screen_location: impl ToString) -> Self {
        self.screen_location = Some(screen_location.to_string());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn fallback(mapping: &FallbackMapping) -> Self {
        Self::now(AuditKind::FallbackMapping)
            .with_content_key(&mapping.content_key)
            .with_screen(&mapping.screen_location)
            .with_detail(format!("field '{}'", mapping.field_name))
    }

    pub fn conflict(conflict: &CellConflict) -> Self {
        Self::now(AuditKind::CellConflict)
            .with_dropdown(&conflict.dropdown_key)
            .with_content_key(&conflict.content_key)
            .with_detail(format!(
                "{} [{}]: '{}' replaced by '{}'",
                conflict.cell, conflict.language, conflict.previous, conflict.replacement
            ))
    }

    pub fn best_effort(slot: &BestEffortSlot) -> Self {
        Self::now(AuditKind::BestEffortSlot)
            .with_dropdown(&slot.dropdown_key)
            .with_content_key(&slot.content_key)
            .with_detail(format!("slot '{}' taken from last key token", slot.slot))
    }
}
