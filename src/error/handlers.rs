//! Error handlers
//!
//! Reports fatal errors and maps them to process exit codes.

use crate::error::types::{ArchiveError, ShellError};
use log::error;

/// Report a fatal shell error to the diagnostic log and the user
pub fn handle_fatal(err: &ShellError) {
    error!("Fatal shell error: {}", err);
    match err {
        ShellError::Archive(ArchiveError::NotFound(_))
        | ShellError::Archive(ArchiveError::InvalidArchive { .. }) => {
            eprintln!("Invalid VFS archive.");
        }
        _ => eprintln!("{}", err),
    }
}

/// Convert error to a process exit code
pub fn exit_code(err: &ShellError) -> u8 {
    match err {
        ShellError::Config(_) => 2,
        ShellError::Archive(_) => 3,
        ShellError::Journal(_) => 1,
        ShellError::IoError(_) => 1,
    }
}
