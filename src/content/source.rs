use std::path::{Path, PathBuf};

use crate::content::content_model::ContentRow;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid content rows in {path} (line {line}): {source}")]
    Parse {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },
}

// ============================================================================
// Loading exported rows
// ============================================================================

/// Load content rows from a JSON array file, a `.jsonl` file, or a directory
/// of such files. Directory entries are read in file-name order; row order
/// inside each file is preserved.
pub fn load_rows(path: &Path) -> Result<Vec<ContentRow>, SourceError> {
    let metadata = std::fs::metadata(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return load_file(path);
    }

    let entries = std::fs::read_dir(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let p = entry.path();
        if p.extension().is_some_and(|e| e == "json" || e == "jsonl") {
            files.push(p);
        }
    }
    files.sort();

    let mut rows = Vec::new();
    for file in &files {
        rows.extend(load_file(file)?);
    }
    tracing::debug!(files = files.len(), rows = rows.len(), "loaded content export directory");
    Ok(rows)
}

fn load_file(path: &Path) -> Result<Vec<ContentRow>, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if path.extension().is_some_and(|e| e == "jsonl") {
        return parse_jsonl(path, &content);
    }

    serde_json::from_str(&content).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        line: source.line(),
        source,
    })
}

fn parse_jsonl(path: &Path, content: &str) -> Result<Vec<ContentRow>, SourceError> {
    let mut rows = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(line).map_err(|source| SourceError::Parse {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

// ============================================================================
// Eligibility filter (the WHERE clause of the legacy read query)
// ============================================================================

/// Keep only active, approved rows that belong to a dropdown.
pub fn eligible(rows: Vec<ContentRow>, statuses: &[String]) -> Vec<ContentRow> {
    rows.into_iter()
        .filter(|row| is_eligible(row, statuses))
        .collect()
}

pub fn is_eligible(row: &ContentRow, statuses: &[String]) -> bool {
    row.is_active
        && row.component_type.is_dropdown_part()
        && statuses
            .iter()
            .any(|s| s.eq_ignore_ascii_case(row.status.trim()))
}
