//! File system operations
//!
//! Host-side file operations behind the shell commands. Callers pass host
//! locations already resolved inside the working area.

use log::info;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::StorageError;

/// Copy a regular file, creating any missing parent directories of `dest`.
///
/// Existing destination files are overwritten; an existing destination
/// directory, or a destination that is the source itself, is refused.
pub fn copy_file(
    src: &Path,
    src_virtual: &str,
    dest: &Path,
    dest_virtual: &str,
) -> Result<u64, StorageError> {
    if !src.exists() {
        return Err(StorageError::FileNotFound(src_virtual.to_string()));
    }
    if src.is_dir() {
        return Err(StorageError::IsADirectory(src_virtual.to_string()));
    }
    if dest.is_dir() {
        return Err(StorageError::DestinationIsDirectory(dest_virtual.to_string()));
    }
    // Copying a file onto itself would truncate it before reading.
    if dest.exists() && fs::canonicalize(src)? == fs::canonicalize(dest)? {
        return Err(StorageError::SameFile {
            src: src_virtual.to_string(),
            dest: dest_virtual.to_string(),
        });
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    let bytes = fs::copy(src, dest)?;

    info!("Copied {} -> {} ({} bytes)", src_virtual, dest_virtual, bytes);
    Ok(bytes)
}

/// Read up to `limit` lines from the start of a file, line endings stripped.
pub fn read_head(path: &Path, limit: usize) -> Result<Vec<String>, StorageError> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::with_capacity(limit);
    for line in reader.lines().take(limit) {
        lines.push(line?);
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("file1.txt");
        fs::write(&src, "Line 1\nLine 2\n").unwrap();
        let dest = dir.path().join("home/user/documents/file2.txt");

        let bytes = copy_file(&src, "/file1.txt", &dest, "/home/user/documents/file2.txt").unwrap();
        assert_eq!(bytes, 14);
        assert_eq!(fs::read(&dest).unwrap(), fs::read(&src).unwrap());
    }

    #[test]
    fn test_copy_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        let dest = dir.path().join("b.txt");
        fs::write(&src, "new").unwrap();
        fs::write(&dest, "old contents").unwrap();

        copy_file(&src, "/a.txt", &dest, "/b.txt").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }

    #[test]
    fn test_copy_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let result = copy_file(
            &dir.path().join("nope"),
            "/nope",
            &dir.path().join("dest"),
            "/dest",
        );
        assert!(matches!(result, Err(StorageError::FileNotFound(p)) if p == "/nope"));
        assert!(!dir.path().join("dest").exists());
    }

    #[test]
    fn test_copy_directory_source_refused() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("home")).unwrap();
        let result = copy_file(
            &dir.path().join("home"),
            "/home",
            &dir.path().join("dest"),
            "/dest",
        );
        assert!(matches!(result, Err(StorageError::IsADirectory(_))));
    }

    #[test]
    fn test_copy_onto_directory_refused() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, "a").unwrap();
        fs::create_dir(dir.path().join("home")).unwrap();
        let result = copy_file(&src, "/a.txt", &dir.path().join("home"), "/home");
        assert!(matches!(result, Err(StorageError::DestinationIsDirectory(p)) if p == "/home"));
    }

    #[test]
    fn test_copy_onto_itself_refused() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("file1.txt");
        fs::write(&src, "Line 1\nLine 2\n").unwrap();
        let same = dir.path().join("./file1.txt");

        let result = copy_file(&src, "/file1.txt", &same, "/file1.txt");
        assert!(matches!(result, Err(StorageError::SameFile { .. })));
        assert_eq!(fs::read_to_string(&src).unwrap(), "Line 1\nLine 2\n");
    }

    #[test]
    fn test_copy_under_existing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("file1.txt");
        fs::write(&src, "a").unwrap();
        let result = copy_file(&src, "/file1.txt", &src.join("x"), "/file1.txt/x");
        assert!(matches!(result, Err(StorageError::IoError(_))));
        assert!(src.is_file());
    }

    #[test]
    fn test_read_head_limits_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.txt");
        let body: String = (1..=15).map(|i| format!("Line {}\n", i)).collect();
        fs::write(&path, body).unwrap();

        let lines = read_head(&path, 10).unwrap();
        let expected: Vec<String> = (1..=10).map(|i| format!("Line {}", i)).collect();
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_read_head_short_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.txt");
        fs::write(&path, "one\r\ntwo\nthree").unwrap();
        assert_eq!(read_head(&path, 10).unwrap(), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_read_head_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_head(dir.path(), 10).is_err());
    }
}
