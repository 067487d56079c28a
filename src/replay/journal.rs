//! Journal of collaborator calls made during a replay.

use super::ReplaySummary;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

const JOURNAL_VERSION: u32 = 1;

/// One recorded collaborator call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    /// Trace time of the frame the call happened in
    pub t: f64,
    pub call: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub detail: Value,
}

#[derive(Debug, Default)]
pub struct Journal {
    now: f64,
    entries: Vec<JournalEntry>,
}

#[derive(Serialize)]
struct JournalFile<'a> {
    version: u32,
    generated_at: String,
    trace: String,
    summary: &'a ReplaySummary,
    entries: &'a [JournalEntry],
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time stamped on entries recorded from now on.
    pub fn set_time(&mut self, t: f64) {
        self.now = t;
    }

    pub fn record(&mut self, call: &str) {
        self.record_with(call, Value::Null);
    }

    pub fn record_with(&mut self, call: &str, detail: Value) {
        self.entries.push(JournalEntry {
            t: self.now,
            call: call.to_string(),
            detail,
        });
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries recorded for `call`.
    pub fn count(&self, call: &str) -> usize {
        self.entries.iter().filter(|e| e.call == call).count()
    }

    /// Writes the journal as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path, trace: &Path, summary: &ReplaySummary) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create journal directory {}", parent.display())
                })?;
            }
        }

        let file = JournalFile {
            version: JOURNAL_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            trace: trace.display().to_string(),
            summary,
            entries: &self.entries,
        };
        let json = serde_json::to_string_pretty(&file).context("Failed to serialise journal")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write journal to {}", path.display()))?;

        log::info!(
            "Wrote {} journal entries to {}",
            self.entries.len(),
            path.display()
        );
        Ok(())
    }
}
