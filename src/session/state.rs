//! Module `session`
//!
//! Defines the `Session` struct holding the identity shown in the prompt,
//! the current virtual directory, and the session log.

use crate::session::journal::SessionLog;
use crate::storage::VIRTUAL_ROOT;

/// State carried across commands for one shell session.
pub struct Session {
    username: String,
    hostname: String,
    current_virtual_path: String,
    log: SessionLog,
}

impl Session {
    pub fn new(username: impl Into<String>, hostname: impl Into<String>, log: SessionLog) -> Self {
        Self {
            username: username.into(),
            hostname: hostname.into(),
            current_virtual_path: VIRTUAL_ROOT.to_string(),
            log,
        }
    }

    /// Interactive prompt: `user@host:cwd$ `.
    pub fn prompt(&self) -> String {
        format!(
            "{}@{}:{}$ ",
            self.username, self.hostname, self.current_virtual_path
        )
    }

    /// Appends `action` to the session log under this session's user.
    pub fn record(&mut self, action: &str) {
        self.log.record(&self.username, action);
    }

    // --------------------
    // Getter methods
    // --------------------

    /// Returns the current virtual directory (always normalized, `/` at the root).
    pub fn current_virtual_path(&self) -> &str {
        &self.current_virtual_path
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    // --------------------
    // Setter methods
    // --------------------

    pub fn set_current_virtual_path(&mut self, path: String) {
        self.current_virtual_path = if path.is_empty() {
            VIRTUAL_ROOT.to_string()
        } else {
            path
        };
    }
}
