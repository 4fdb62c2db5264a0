//! violations.rs - Per-author violation counters and the in-memory audit log.
//!
//! The tracker is an injected service rather than process state: hosts own
//! an instance (usually behind an `Arc`) and pass it where verdicts are
//! recorded. Counters and the log share one lock, so a count increment and
//! its log entry are a single step and concurrent recordings are never lost.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tinytemplate::TinyTemplate;

use crate::verdict::MatchReason;

/// Chat-platform user identifier.
pub type AuthorId = u64;

/// One audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationRecord {
    pub author_id: AuthorId,
    #[serde(default)]
    pub author_handle: Option<String>,
    pub text: String,
    #[serde(default)]
    pub reason: Option<MatchReason>,
    pub timestamp: DateTime<Utc>,
}

impl ViolationRecord {
    pub fn new(author_id: AuthorId, author_handle: Option<&str>, text: &str, reason: Option<MatchReason>) -> Self {
        Self {
            author_id,
            author_handle: author_handle.filter(|h| !h.is_empty()).map(str::to_string),
            text: text.to_string(),
            reason,
            timestamp: Utc::now(),
        }
    }
}

/// Renders a record through a TinyTemplate.
///
/// Available fields: `author_id`, `handle` (`none` when absent), `text`,
/// `reason` and `timestamp` (RFC 3339).
pub fn format_log_entry(record: &ViolationRecord, template: &str) -> Result<String> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template("entry", template)
        .context("Failed to parse log entry template")?;
    let ctx = serde_json::json!({
        "author_id": record.author_id,
        "handle": record.author_handle.as_deref().unwrap_or("none"),
        "text": record.text,
        "reason": record.reason.as_ref().map(|r| r.to_string()).unwrap_or_default(),
        "timestamp": record.timestamp.to_rfc3339(),
    });
    tt.render("entry", &ctx).map_err(|e| anyhow!("Failed to render log entry template: {}", e))
}

#[derive(Debug, Default)]
struct TrackerState {
    counts: HashMap<AuthorId, u64>,
    handles: HashMap<AuthorId, String>,
    log: Vec<ViolationRecord>,
}

/// Counts violations per author and keeps an append-only audit log.
#[derive(Debug, Default)]
pub struct ViolationTracker {
    state: Mutex<TrackerState>,
}

impl ViolationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        // Mutations never panic mid-update, so poisoned state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records one violation and returns the author's new count.
    pub fn record_violation(&self, author_id: AuthorId, author_handle: Option<&str>, text: &str) -> u64 {
        self.record(ViolationRecord::new(author_id, author_handle, text, None))
    }

    /// Records a prepared entry and returns the author's new count.
    pub fn record(&self, record: ViolationRecord) -> u64 {
        let mut state = self.lock();
        let count = {
            let count = state.counts.entry(record.author_id).or_insert(0);
            *count += 1;
            *count
        };
        if let Some(handle) = &record.author_handle {
            state.handles.insert(record.author_id, handle.clone());
        }
        state.log.push(record);
        count
    }

    pub fn count_for(&self, author_id: AuthorId) -> u64 {
        self.lock().counts.get(&author_id).copied().unwrap_or(0)
    }

    /// Up to `n` authors ordered by count, highest first; ties by ascending id.
    pub fn top_violators(&self, n: usize) -> Vec<(AuthorId, u64)> {
        let mut ranked: Vec<(AuthorId, u64)> = self.lock().counts.iter().map(|(id, c)| (*id, *c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }

    /// Last known handle, or `ID:<id>`.
    pub fn display_name(&self, author_id: AuthorId) -> String {
        self.lock()
            .handles
            .get(&author_id)
            .cloned()
            .unwrap_or_else(|| format!("ID:{}", author_id))
    }

    pub fn total_violations(&self) -> u64 {
        self.lock().counts.values().sum()
    }

    /// Snapshot of the audit log in recording order.
    pub fn audit_log(&self) -> Vec<ViolationRecord> {
        self.lock().log.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().log.is_empty()
    }
}
