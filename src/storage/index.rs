//! VFS index
//!
//! A flat enumeration of every file and directory in the working area, plus a
//! prefix-grouped view of it so listings never rescan the whole set.

use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use walkdir::WalkDir;

use crate::error::ArchiveError;
use crate::storage::validation::{VIRTUAL_ROOT, as_directory};

/// Snapshot of the working area's entries.
///
/// Directories are stored with a trailing `/`, files without. The index is
/// rebuilt wholesale after every mutation and never patched in place.
#[derive(Debug, Clone, Default)]
pub struct VfsIndex {
    entries: BTreeSet<String>,
    children: BTreeMap<String, BTreeSet<String>>,
}

impl VfsIndex {
    /// Walk the working area and index everything below it.
    pub fn rebuild(root: &Path) -> Result<Self, ArchiveError> {
        let mut paths = Vec::new();

        for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
            let entry = entry?;
            let relative = match entry.path().strip_prefix(root) {
                Ok(relative) => relative,
                Err(_) => continue,
            };
            let segments: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            let mut virtual_path = format!("/{}", segments.join("/"));
            if entry.file_type().is_dir() {
                virtual_path.push('/');
            }
            paths.push(virtual_path);
        }

        let index = Self::from_paths(paths);
        debug!("Rebuilt VFS index: {} entries", index.len());
        Ok(index)
    }

    /// Build an index from already-formed virtual paths.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::default();
        index.children.insert(VIRTUAL_ROOT.to_string(), BTreeSet::new());

        for path in paths {
            let path = path.into();
            index.group(&path);
            index.entries.insert(path);
        }

        index
    }

    /// Register `path` as an immediate child of each of its ancestors,
    /// synthesizing directory entries for ancestors with no marker of their own.
    fn group(&mut self, path: &str) {
        let is_dir = path.ends_with('/');
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return;
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        let mut prefix = VIRTUAL_ROOT.to_string();
        for (i, segment) in segments.iter().enumerate() {
            let last = i + 1 == segments.len();
            let child = if last && !is_dir {
                segment.to_string()
            } else {
                format!("{}/", segment)
            };
            self.children
                .entry(prefix.clone())
                .or_default()
                .insert(child);
            prefix.push_str(segment);
            prefix.push('/');
        }
    }

    /// Immediate children of a directory, sorted, directories suffixed with `/`.
    pub fn list(&self, prefix: &str) -> Vec<String> {
        let prefix = as_directory(prefix);
        self.children
            .get(&prefix)
            .map(|names| names.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether `path` is an entry or a directory prefix of some entry.
    pub fn exists(&self, path: &str) -> bool {
        self.entries.contains(path) || self.is_directory(path)
    }

    /// Whether `path` names a directory, marked or implied by its children.
    pub fn is_directory(&self, path: &str) -> bool {
        let dir = as_directory(path);
        dir == VIRTUAL_ROOT || self.entries.contains(&dir) || self.children.contains_key(&dir)
    }

    /// Whether `path` names an indexed file.
    pub fn is_file(&self, path: &str) -> bool {
        !path.ends_with('/') && self.entries.contains(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
