//! Error types
//!
//! Defines domain-specific error types for each module of the shell.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Archive lifecycle errors (extraction and repackaging)
#[derive(Debug)]
pub enum ArchiveError {
    NotFound(PathBuf),
    InvalidArchive { path: PathBuf, reason: String },
    Closed,
    IoError(io::Error),
    PackFailed(String),
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveError::NotFound(p) => write!(f, "Archive not found: {}", p.display()),
            ArchiveError::InvalidArchive { path, reason } => {
                write!(f, "Invalid VFS archive {}: {}", path.display(), reason)
            }
            ArchiveError::Closed => write!(f, "Working area already closed"),
            ArchiveError::IoError(e) => write!(f, "IO error: {}", e),
            ArchiveError::PackFailed(msg) => write!(f, "Failed to repackage archive: {}", msg),
        }
    }
}

impl std::error::Error for ArchiveError {}

impl From<io::Error> for ArchiveError {
    fn from(error: io::Error) -> Self {
        ArchiveError::IoError(error)
    }
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(error: zip::result::ZipError) -> Self {
        match error {
            zip::result::ZipError::Io(e) => ArchiveError::IoError(e),
            other => ArchiveError::PackFailed(other.to_string()),
        }
    }
}

impl From<walkdir::Error> for ArchiveError {
    fn from(error: walkdir::Error) -> Self {
        ArchiveError::IoError(io::Error::from(error))
    }
}

/// Path resolution errors
#[derive(Debug, PartialEq)]
pub enum PathError {
    InvalidPath(String),
    PathTraversal(String),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::InvalidPath(p) => write!(f, "Invalid path: {}", p),
            PathError::PathTraversal(p) => write!(f, "Path traversal attempt: {}", p),
        }
    }
}

impl std::error::Error for PathError {}

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    FileNotFound(String),
    IsADirectory(String),
    DestinationIsDirectory(String),
    SameFile { src: String, dest: String },
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::FileNotFound(p) => write!(f, "File not found: {}", p),
            StorageError::IsADirectory(p) => write!(f, "Is a directory: {}", p),
            StorageError::DestinationIsDirectory(p) => {
                write!(f, "Destination is a directory: {}", p)
            }
            StorageError::SameFile { src, dest } => {
                write!(f, "{} and {} are the same file", src, dest)
            }
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// Navigate module errors
#[derive(Debug, PartialEq)]
pub enum NavigateError {
    DirectoryNotFound(String),
}

impl fmt::Display for NavigateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigateError::DirectoryNotFound(p) => write!(f, "Directory not found: {}", p),
        }
    }
}

impl std::error::Error for NavigateError {}

/// Session log errors
#[derive(Debug)]
pub enum JournalError {
    Serialize(serde_json::Error),
    IoError(io::Error),
}

impl fmt::Display for JournalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalError::Serialize(e) => write!(f, "Failed to serialize session log: {}", e),
            JournalError::IoError(e) => write!(f, "Failed to write session log: {}", e),
        }
    }
}

impl std::error::Error for JournalError {}

impl From<serde_json::Error> for JournalError {
    fn from(error: serde_json::Error) -> Self {
        JournalError::Serialize(error)
    }
}

impl From<io::Error> for JournalError {
    fn from(error: io::Error) -> Self {
        JournalError::IoError(error)
    }
}

impl From<tempfile::PersistError> for JournalError {
    fn from(error: tempfile::PersistError) -> Self {
        JournalError::IoError(error.error)
    }
}

/// Top-level shell error that encompasses all fatal error types
#[derive(Debug)]
pub enum ShellError {
    Config(config::ConfigError),
    Archive(ArchiveError),
    Journal(JournalError),
    IoError(io::Error),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Config(e) => write!(f, "Configuration error: {}", e),
            ShellError::Archive(e) => write!(f, "{}", e),
            ShellError::Journal(e) => write!(f, "{}", e),
            ShellError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ShellError {}

impl From<config::ConfigError> for ShellError {
    fn from(error: config::ConfigError) -> Self {
        ShellError::Config(error)
    }
}

impl From<ArchiveError> for ShellError {
    fn from(error: ArchiveError) -> Self {
        ShellError::Archive(error)
    }
}

impl From<JournalError> for ShellError {
    fn from(error: JournalError) -> Self {
        ShellError::Journal(error)
    }
}

impl From<io::Error> for ShellError {
    fn from(error: io::Error) -> Self {
        ShellError::IoError(error)
    }
}
