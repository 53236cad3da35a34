//! Archive lifecycle
//!
//! Extracts the VFS archive into a private working area on startup and packs
//! the working area back over the archive on shutdown.

use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::ArchiveError;

const WORK_AREA_PREFIX: &str = "vfs-shell-";

/// An extracted archive and the location it came from.
pub struct Workspace {
    archive_path: PathBuf,
    area: Option<TempDir>,
}

impl Workspace {
    /// Validate the archive and extract every entry into a fresh working area.
    pub fn open(archive_path: impl AsRef<Path>) -> Result<Self, ArchiveError> {
        let archive_path = archive_path.as_ref().to_path_buf();
        if !archive_path.is_file() {
            return Err(ArchiveError::NotFound(archive_path));
        }

        let file = File::open(&archive_path)?;
        let mut archive = ZipArchive::new(file).map_err(|e| ArchiveError::InvalidArchive {
            path: archive_path.clone(),
            reason: e.to_string(),
        })?;

        let area = tempfile::Builder::new()
            .prefix(WORK_AREA_PREFIX)
            .tempdir()?;

        // Entries whose names would escape the area are refused by the extractor.
        archive
            .extract(area.path())
            .map_err(|e| ArchiveError::InvalidArchive {
                path: archive_path.clone(),
                reason: e.to_string(),
            })?;

        info!(
            "Extracted {} entries from {} into {}",
            archive.len(),
            archive_path.display(),
            area.path().display()
        );

        Ok(Self {
            archive_path,
            area: Some(area),
        })
    }

    /// Root of the working area.
    pub fn root(&self) -> Result<&Path, ArchiveError> {
        self.area
            .as_ref()
            .map(TempDir::path)
            .ok_or(ArchiveError::Closed)
    }

    pub fn is_open(&self) -> bool {
        self.area.is_some()
    }

    /// Pack the working area into a new archive, move it over the original,
    /// then remove the working area. Closing twice is a no-op.
    ///
    /// If packing fails the original archive and the working area are both
    /// left untouched.
    pub fn close(&mut self) -> Result<(), ArchiveError> {
        let root = match self.area.as_ref() {
            Some(area) => area.path().to_path_buf(),
            None => {
                debug!("Working area already closed");
                return Ok(());
            }
        };

        let target_dir = match self.archive_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut staged = NamedTempFile::new_in(&target_dir)?;
        let packed = pack_directory(&root, staged.as_file_mut())?;
        // The staged file is created owner-only; keep the archive's own mode.
        if let Ok(metadata) = fs::metadata(&self.archive_path) {
            staged.as_file().set_permissions(metadata.permissions())?;
        }
        staged.as_file().sync_all()?;
        staged
            .persist(&self.archive_path)
            .map_err(|e| ArchiveError::IoError(e.error))?;

        info!(
            "Repackaged {} entries into {}",
            packed,
            self.archive_path.display()
        );

        if let Some(area) = self.area.take() {
            area.close()?;
        }
        Ok(())
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Some(area) = &self.area {
            warn!(
                "Discarding working area {} without repackaging",
                area.path().display()
            );
        }
    }
}

/// Write every file and directory under `root` into a zip stream.
fn pack_directory<W: Write + Seek>(root: &Path, writer: W) -> Result<usize, ArchiveError> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut count = 0;

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let name = entry_name(root, entry.path())?;
        if entry.file_type().is_dir() {
            zip.add_directory(format!("{}/", name), options)?;
        } else {
            zip.start_file(name, options)?;
            let mut file = File::open(entry.path())?;
            io::copy(&mut file, &mut zip)?;
        }
        count += 1;
    }

    zip.finish()?;
    Ok(count)
}

/// Archive entry name for a host path: relative, slash-separated.
fn entry_name(root: &Path, path: &Path) -> Result<String, ArchiveError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| ArchiveError::PackFailed(format!("{} is outside the working area", path.display())))?;
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn write_archive(path: &Path, files: &[(&str, &str)], dirs: &[&str]) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for dir in dirs {
            zip.add_directory(*dir, options).unwrap();
        }
        for (name, body) in files {
            zip.start_file(*name, options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_open_missing_archive() {
        let dir = tempfile::tempdir().unwrap();
        let result = Workspace::open(dir.path().join("absent.zip"));
        assert!(matches!(result, Err(ArchiveError::NotFound(_))));
    }

    #[test]
    fn test_open_rejects_non_zip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vfs.zip");
        fs::write(&path, "definitely not a zip").unwrap();
        let result = Workspace::open(&path);
        assert!(matches!(result, Err(ArchiveError::InvalidArchive { .. })));
    }

    #[test]
    fn test_open_extracts_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vfs.zip");
        write_archive(&path, &[("docs/a.txt", "alpha")], &["home/user/"]);

        let workspace = Workspace::open(&path).unwrap();
        let root = workspace.root().unwrap();
        assert_eq!(fs::read_to_string(root.join("docs/a.txt")).unwrap(), "alpha");
        assert!(root.join("home/user").is_dir());
    }

    #[test]
    fn test_close_repacks_and_removes_area() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vfs.zip");
        write_archive(&path, &[("a.txt", "alpha")], &[]);

        let mut workspace = Workspace::open(&path).unwrap();
        let root = workspace.root().unwrap().to_path_buf();
        fs::create_dir_all(root.join("new/dir")).unwrap();
        fs::write(root.join("new/dir/b.txt"), "beta").unwrap();
        workspace.close().unwrap();

        assert!(!root.exists());
        assert!(!workspace.is_open());
        assert!(matches!(workspace.root(), Err(ArchiveError::Closed)));

        let mut archive = ZipArchive::new(File::open(&path).unwrap()).unwrap();
        let mut body = String::new();
        archive
            .by_name("new/dir/b.txt")
            .unwrap()
            .read_to_string(&mut body)
            .unwrap();
        assert_eq!(body, "beta");
        assert!(archive.by_name("a.txt").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_close_keeps_archive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vfs.zip");
        write_archive(&path, &[("a.txt", "alpha")], &[]);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let mut workspace = Workspace::open(&path).unwrap();
        workspace.close().unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_close_twice_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vfs.zip");
        write_archive(&path, &[("a.txt", "alpha")], &[]);

        let mut workspace = Workspace::open(&path).unwrap();
        workspace.close().unwrap();
        let first = fs::read(&path).unwrap();
        workspace.close().unwrap();
        assert_eq!(fs::read(&path).unwrap(), first);
    }

    #[test]
    fn test_close_leaves_no_staging_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vfs.zip");
        write_archive(&path, &[("a.txt", "alpha")], &[]);

        let mut workspace = Workspace::open(&path).unwrap();
        workspace.close().unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("vfs.zip")]);
    }
}
