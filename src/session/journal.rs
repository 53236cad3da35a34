//! Session journal
//!
//! Keeps every executed command in memory and mirrors the whole history to a
//! JSON array on disk after each entry.

use chrono::Local;
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::JournalError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// One executed command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub user: String,
    pub action: String,
}

impl LogEntry {
    pub fn now(user: &str, action: &str) -> Self {
        Self {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            user: user.to_string(),
            action: action.to_string(),
        }
    }
}

/// Append-only history, rewritten in full on every entry.
pub struct SessionLog {
    path: PathBuf,
    entries: Vec<LogEntry>,
}

impl SessionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Appends an entry and rewrites the log file.
    ///
    /// A failed write is reported but the entry stays in memory, so the next
    /// successful write still holds the complete history.
    pub fn record(&mut self, user: &str, action: &str) {
        self.entries.push(LogEntry::now(user, action));
        if let Err(e) = self.flush() {
            error!("Failed to write session log {}: {}", self.path.display(), e);
        }
    }

    /// Rewrites the log file with the complete history.
    pub fn flush(&self) -> Result<(), JournalError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.entries.serialize(&mut serializer)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(&buf)?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path)?;
        Ok(())
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn read_log(path: &Path) -> Vec<LogEntry> {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_record_rewrites_full_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        let mut log = SessionLog::new(&path);

        log.record("test_user", "ls");
        assert_eq!(read_log(&path).len(), 1);

        log.record("test_user", "cd home/user");
        let entries = read_log(&path);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, "ls");
        assert_eq!(entries[1].action, "cd home/user");
        assert_eq!(entries[1].user, "test_user");
        assert_eq!(entries, log.entries());
    }

    #[test]
    fn test_timestamp_is_iso8601() {
        let entry = LogEntry::now("u", "ls");
        assert!(chrono::NaiveDateTime::parse_from_str(&entry.timestamp, TIMESTAMP_FORMAT).is_ok());
        assert_eq!(entry.timestamp.as_bytes()[10], b'T');
    }

    #[test]
    fn test_file_is_indented_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        let mut log = SessionLog::new(&path);
        log.record("u", "exit");

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with('['));
        assert!(text.contains("\n        \"action\": \"exit\""));
    }

    #[test]
    fn test_unwritable_path_keeps_entries() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = SessionLog::new(dir.path().join("missing/dir/log.json"));
        log.record("u", "ls");
        log.record("u", "exit");
        assert_eq!(log.entries().len(), 2);
        assert!(log.flush().is_err());
    }
}
