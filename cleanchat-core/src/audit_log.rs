// cleanchat-core/src/audit_log.rs
//! Append-only JSON-lines file of violation records.
//!
//! The in-memory tracker is the source of truth for a running process;
//! this file is an opt-in export for hosts that want a durable trail.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::violations::ViolationRecord;

#[derive(Debug)]
pub struct AuditLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl AuditLog {
    /// Opens `path` for appending, creating it and its parent directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create audit log directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open audit log {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    /// Writes one record as a JSON line and flushes it.
    pub fn append(&mut self, record: &ViolationRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)
            .context("Failed to serialize violation record")?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
            .with_context(|| format!("Failed to flush audit log {}", self.path.display()))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record back from a log file.
    pub fn read_all<P: AsRef<Path>>(path: P) -> Result<Vec<ViolationRecord>> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open audit log {}", path.display()))?;
        let mut records = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line)
                .with_context(|| format!("Malformed audit log entry at line {}", idx + 1))?;
            records.push(record);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::MatchReason;
    use tempfile::tempdir;

    #[test]
    fn test_append_and_read_back() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("audit.jsonl");

        let mut log = AuditLog::open(&path)?;
        log.append(&ViolationRecord::new(1, Some("vasya"), "сука", Some(MatchReason::Exact { word: "сука".into() })))?;
        log.append(&ViolationRecord::new(2, None, "еб", None))?;
        drop(log);

        // Reopening appends rather than truncating.
        let mut log = AuditLog::open(&path)?;
        log.append(&ViolationRecord::new(3, None, "хуй", None))?;

        let records = AuditLog::read_all(&path)?;
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].author_handle.as_deref(), Some("vasya"));
        assert_eq!(records[2].author_id, 3);
        Ok(())
    }
}
