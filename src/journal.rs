//! Event journal: a JSONL record of what the dashboard did.
//!
//! One line per event (session start, theme change, telemetry outcome,
//! request errors) in `~/.mockboard/events.jsonl`. Writes are best-effort:
//! a failure to journal never reaches the caller.

use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A single journal line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEvent {
    pub timestamp: String,
    /// Event kind, e.g. `"session"`, `"theme"`, `"telemetry"`, `"error"`.
    pub kind: String,
    pub detail: String,
}

impl JournalEvent {
    pub fn new(kind: &str, detail: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            kind: kind.to_string(),
            detail: detail.into(),
        }
    }
}

/// Record an event in the default journal.
pub fn record(kind: &str, detail: impl Into<String>) {
    if let Some(path) = journal_path() {
        let _ = append_to(&path, &JournalEvent::new(kind, detail));
    }
}

/// Append one event to the journal at `path`.
pub fn append_to(path: &Path, event: &JournalEvent) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(event)?;
    writeln!(file, "{json}")?;

    Ok(())
}

/// Path to the journal file.
pub fn journal_path() -> Option<PathBuf> {
    crate::config::data_dir().map(|dir| dir.join("events.jsonl"))
}
