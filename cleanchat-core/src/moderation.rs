//! moderation.rs - Host-facing glue between incoming messages, the
//! detection engine and the violation tracker.
//!
//! A chat host hands each message to [`Moderator::handle_message`], or
//! pushes messages into a channel consumed by [`Moderator::listen`]. Banned
//! messages are counted against their author, logged through the report
//! template, and optionally appended to a JSON-lines audit file.
//!
//! License: MIT OR APACHE 2.0

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::audit_log::AuditLog;
use crate::config::DEFAULT_LOG_TEMPLATE;
use crate::engine::ModerationEngine;
use crate::verdict::Verdict;
use crate::violations::{format_log_entry, AuthorId, ViolationRecord, ViolationTracker};

/// A chat message as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub author_id: AuthorId,
    #[serde(default)]
    pub author_handle: Option<String>,
    /// `None` for non-text messages (stickers, media).
    #[serde(default)]
    pub text: Option<String>,
}

impl IncomingMessage {
    pub fn text(author_id: AuthorId, author_handle: Option<&str>, text: &str) -> Self {
        Self {
            author_id,
            author_handle: author_handle.map(str::to_string),
            text: Some(text.to_string()),
        }
    }
}

/// Counters for one `listen` session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModerationSummary {
    pub processed: u64,
    pub skipped: u64,
    pub banned: u64,
}

pub struct Moderator {
    engine: Arc<dyn ModerationEngine>,
    tracker: Arc<ViolationTracker>,
    log_template: String,
    audit_log: Option<Mutex<AuditLog>>,
}

impl Moderator {
    pub fn new(engine: Arc<dyn ModerationEngine>, tracker: Arc<ViolationTracker>) -> Self {
        Self {
            engine,
            tracker,
            log_template: DEFAULT_LOG_TEMPLATE.to_string(),
            audit_log: None,
        }
    }

    pub fn with_log_template(mut self, template: impl Into<String>) -> Self {
        self.log_template = template.into();
        self
    }

    pub fn with_audit_log(mut self, audit_log: AuditLog) -> Self {
        self.audit_log = Some(Mutex::new(audit_log));
        self
    }

    pub fn tracker(&self) -> &Arc<ViolationTracker> {
        &self.tracker
    }

    pub fn engine(&self) -> &Arc<dyn ModerationEngine> {
        &self.engine
    }

    /// Classifies one message and records a violation when it is banned.
    ///
    /// Returns `None` for messages without text, which are not classified.
    pub fn handle_message(&self, message: &IncomingMessage) -> Option<Verdict> {
        let text = message.text.as_deref().filter(|t| !t.is_empty())?;
        let verdict = self.engine.classify(text);

        if let Some(reason) = &verdict.reason {
            let record = ViolationRecord::new(
                message.author_id,
                message.author_handle.as_deref(),
                text,
                Some(reason.clone()),
            );
            let count = self.tracker.record(record.clone());

            match format_log_entry(&record, &self.log_template) {
                Ok(line) => info!("{} [total: {}]", line, count),
                Err(e) => warn!("Failed to format violation log entry: {}", e),
            }

            if let Some(audit_log) = &self.audit_log {
                let mut audit_log = audit_log.lock().unwrap_or_else(PoisonError::into_inner);
                if let Err(e) = audit_log.append(&record) {
                    warn!("Failed to write audit log {}: {:#}", audit_log.path().display(), e);
                }
            }
        }

        Some(verdict)
    }

    /// Consumes messages until every sender is dropped.
    pub fn listen(self: Arc<Self>, mut rx: mpsc::Receiver<IncomingMessage>) -> JoinHandle<ModerationSummary> {
        tokio::spawn(async move {
            let mut summary = ModerationSummary::default();
            while let Some(message) = rx.recv().await {
                // Classification and audit writes block; keep them off the async workers.
                let moderator = Arc::clone(&self);
                let handled = tokio::task::spawn_blocking(move || moderator.handle_message(&message)).await;
                match handled {
                    Ok(Some(verdict)) => {
                        summary.processed += 1;
                        if verdict.is_banned() {
                            summary.banned += 1;
                        }
                    }
                    Ok(None) => summary.skipped += 1,
                    Err(e) => {
                        warn!("Moderation task failed, message skipped: {}", e);
                        summary.skipped += 1;
                    }
                }
            }
            info!(
                "Moderation stream closed: {} processed, {} banned, {} skipped.",
                summary.processed, summary.banned, summary.skipped
            );
            summary
        })
    }
}
