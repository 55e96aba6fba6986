use std::{fs::OpenOptions, io::Write, path::Path, sync::Mutex};

use crate::trace::trace::AuditEvent;

/// Append-only JSONL audit trail. If the file cannot be opened the logger
/// is disabled and the migration carries on.
pub struct AuditLogger {
    file: Option<Mutex<std::fs::File>>,
}

impl AuditLogger {
    pub fn new(path: &Path) -> Self {
        let file = OpenOptions::new().create(true).append(true).open(path);

        match file {
            Ok(f) => Self {
                file: Some(Mutex::new(f)),
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not open audit log");
                Self { file: None }
            }
        }
    }

    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    pub fn log(&self, event: &AuditEvent) {
        let file_mutex = match &self.file {
            Some(f) => f,
            None => return, // auditing disabled
        };

        let json = match serde_json::to_string(event) {
            Ok(j) => j,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize audit event");
                return;
            }
        };

        let mut file = match file_mutex.lock() {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(error = %e, "audit logger lock poisoned");
                return;
            }
        };

        if let Err(e) = writeln!(file, "{}", json) {
            tracing::warn!(error = %e, "failed to write audit event");
        }
    }
}
