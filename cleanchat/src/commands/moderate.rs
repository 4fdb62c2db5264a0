//! `moderate` command: stream authored messages through a `Moderator` and
//! report the top violators.
//!
//! Each input line is either `author_id<TAB>handle<TAB>text` (the handle may
//! be empty, or the field omitted as `author_id<TAB>text`) or, with `--json`,
//! an `IncomingMessage` object. Malformed lines are skipped with a warning.

use anyhow::{anyhow, Context, Result};
use is_terminal::IsTerminal;
use log::warn;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use cleanchat_core::{
    AuditLog, AuthorId, FilterConfig, IncomingMessage, ModerationEngine, ModerationSummary, Moderator,
    ViolationTracker,
};

use crate::ui::stats_table;
use crate::ui::theme::ThemeMap;

const CHANNEL_CAPACITY: usize = 256;

pub struct ModerateOptions {
    pub input: Option<PathBuf>,
    pub json: bool,
    pub top: Option<usize>,
    pub audit_log: Option<PathBuf>,
}

/// Result of a `moderate` run.
#[derive(Debug)]
pub struct ModerateReport {
    pub summary: ModerationSummary,
    /// Lines that could not be parsed.
    pub invalid: u64,
    pub tracker: Arc<ViolationTracker>,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_message_line(line: &str, json: bool) -> Result<Option<IncomingMessage>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    if json {
        let message = serde_json::from_str(line).context("Invalid JSON message")?;
        return Ok(Some(message));
    }

    let mut fields = line.splitn(3, '\t');
    let id_field = fields.next().unwrap_or_default();
    let author_id: AuthorId = id_field
        .trim()
        .parse()
        .with_context(|| format!("Invalid author id '{}'", id_field))?;

    let (handle, text) = match (fields.next(), fields.next()) {
        (Some(handle), Some(text)) => (Some(handle.trim()).filter(|h| !h.is_empty()), text),
        (Some(text), None) => (None, text),
        _ => return Err(anyhow!("Expected author_id<TAB>handle<TAB>text")),
    };

    Ok(Some(IncomingMessage::text(author_id, handle, text)))
}

async fn open_input(input: Option<&PathBuf>) -> Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    Ok(match input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    })
}

/// Feeds every parsed line to a listening `Moderator` and waits for it to drain.
pub async fn moderate_stream(
    engine: Arc<dyn ModerationEngine>,
    config: &FilterConfig,
    opts: &ModerateOptions,
) -> Result<ModerateReport> {
    let tracker = Arc::new(ViolationTracker::new());
    let mut moderator = Moderator::new(engine, Arc::clone(&tracker))
        .with_log_template(config.reporting.log_template.clone());
    if let Some(path) = &opts.audit_log {
        moderator = moderator.with_audit_log(AuditLog::open(path)?);
    }

    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let listener = Arc::new(moderator).listen(rx);

    let mut lines = open_input(opts.input.as_ref()).await?.lines();
    let mut invalid = 0u64;
    let mut line_no = 0usize;
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        line_no += 1;
        match parse_message_line(&line, opts.json) {
            Ok(Some(message)) => {
                if tx.send(message).await.is_err() {
                    return Err(anyhow!("Moderation listener stopped unexpectedly"));
                }
            }
            Ok(None) => {}
            Err(e) => {
                invalid += 1;
                warn!("Skipping line {}: {:#}", line_no, e);
            }
        }
    }
    drop(tx);

    let summary = listener.await.context("Moderation listener task failed")?;
    Ok(ModerateReport { summary, invalid, tracker })
}

/// Runs `moderate` and prints the violators report to stdout.
pub async fn run_moderate(
    engine: Arc<dyn ModerationEngine>,
    config: &FilterConfig,
    opts: ModerateOptions,
    theme: &ThemeMap,
) -> Result<ModerateReport> {
    let report = moderate_stream(engine, config, &opts).await?;

    let top = opts.top.unwrap_or(config.reporting.top_n);
    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    stats_table::print_top_violators(&mut stdout.lock(), &report.tracker, top, theme, supports_color)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tab_separated_lines() {
        let message = parse_message_line("42\tvasya\tну\tты", false).unwrap().unwrap();
        assert_eq!(message.author_id, 42);
        assert_eq!(message.author_handle.as_deref(), Some("vasya"));
        assert_eq!(message.text.as_deref(), Some("ну\tты"));

        let message = parse_message_line("7\t\tпривет\r", false).unwrap().unwrap();
        assert_eq!(message.author_handle, None);
        assert_eq!(message.text.as_deref(), Some("привет"));

        let message = parse_message_line("7\tпривет", false).unwrap().unwrap();
        assert_eq!(message.author_handle, None);
        assert_eq!(message.text.as_deref(), Some("привет"));
    }

    #[test]
    fn parses_json_lines() {
        let message = parse_message_line(r#"{"author_id": 5, "text": "сука"}"#, true).unwrap().unwrap();
        assert_eq!(message, IncomingMessage::text(5, None, "сука"));

        let sticker = parse_message_line(r#"{"author_id": 5}"#, true).unwrap().unwrap();
        assert_eq!(sticker.text, None);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_message_line("vasya\tсука", false).is_err());
        assert!(parse_message_line("12", false).is_err());
        assert!(parse_message_line("{not json", true).is_err());
        assert!(parse_message_line("   ", false).unwrap().is_none());
    }
}
