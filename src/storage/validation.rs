//! Path validation
//!
//! Normalizes user-supplied paths into virtual paths and maps them onto the
//! working area, refusing anything that would land outside of it.

use std::path::{Component, Path, PathBuf};

use crate::error::PathError;

/// Root of the virtual namespace
pub const VIRTUAL_ROOT: &str = "/";

/// Lexically normalize `path` against the current virtual directory.
///
/// Relative paths are joined onto `cwd` first. `.` segments are dropped and
/// `..` pops one segment, stopping at the root. The index is never consulted,
/// so the result may name something that does not exist. The result always
/// starts with `/` and carries no trailing slash unless it is the root.
pub fn normalize_path(path: &str, cwd: &str) -> String {
    let joined = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("{}/{}", cwd.trim_end_matches('/'), path)
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    format!("/{}", segments.join("/"))
}

/// Directory form of a virtual path: always ends with `/`.
pub fn as_directory(virtual_path: &str) -> String {
    if virtual_path.ends_with('/') {
        virtual_path.to_string()
    } else {
        format!("{}/", virtual_path)
    }
}

/// Parent of a normalized virtual path (`/` is its own parent).
pub fn parent_path(virtual_path: &str) -> String {
    match virtual_path.trim_end_matches('/').rsplit_once('/') {
        Some(("", _)) | None => VIRTUAL_ROOT.to_string(),
        Some((parent, _)) => parent.to_string(),
    }
}

/// Map an absolute virtual path onto the working area.
///
/// Every segment must be a plain name; anything else (`..`, drive prefixes,
/// a relative input) is rejected so the result stays under `root`.
pub fn virtual_to_real_path(root: &Path, virtual_path: &str) -> Result<PathBuf, PathError> {
    if !virtual_path.starts_with('/') {
        return Err(PathError::InvalidPath(virtual_path.to_string()));
    }
    if virtual_path.contains('\0') {
        return Err(PathError::InvalidPath(virtual_path.to_string()));
    }

    let relative = Path::new(virtual_path.trim_start_matches('/'));
    let mut real_path = root.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(name) => real_path.push(name),
            Component::CurDir => {}
            _ => return Err(PathError::PathTraversal(virtual_path.to_string())),
        }
    }

    if !real_path.starts_with(root) {
        return Err(PathError::PathTraversal(virtual_path.to_string()));
    }

    Ok(real_path)
}

/// Normalize `path` against `cwd` and resolve it inside the working area.
///
/// Returns the host location together with the normalized virtual path.
pub fn resolve_path(root: &Path, cwd: &str, path: &str) -> Result<(PathBuf, String), PathError> {
    if path.is_empty() {
        return Err(PathError::InvalidPath("Empty path provided".into()));
    }
    let virtual_path = normalize_path(path, cwd);
    let real_path = virtual_to_real_path(root, &virtual_path)?;
    Ok((real_path, virtual_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_relative_joins_cwd() {
        assert_eq!(normalize_path("user", "/home"), "/home/user");
        assert_eq!(normalize_path("home/user", "/"), "/home/user");
    }

    #[test]
    fn test_normalize_absolute_ignores_cwd() {
        assert_eq!(normalize_path("/etc/./passwd", "/home/user"), "/etc/passwd");
    }

    #[test]
    fn test_normalize_dotdot() {
        assert_eq!(normalize_path("..", "/a/b"), "/a");
        assert_eq!(normalize_path("../c/./d/..", "/a/b"), "/a/c");
    }

    #[test]
    fn test_normalize_dotdot_clamps_at_root() {
        assert_eq!(normalize_path("..", "/"), "/");
        assert_eq!(normalize_path("../../../etc/passwd", "/home"), "/etc/passwd");
        assert_eq!(normalize_path("/..", "/"), "/");
    }

    #[test]
    fn test_normalize_strips_trailing_and_duplicate_slashes() {
        assert_eq!(normalize_path("home//user/", "/"), "/home/user");
        assert_eq!(normalize_path("", "/home"), "/home");
    }

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("/a/b"), "/a");
        assert_eq!(parent_path("/a"), "/");
        assert_eq!(parent_path("/"), "/");
    }

    #[test]
    fn test_virtual_to_real_path_stays_under_root() {
        let root = Path::new("/tmp/work");
        assert_eq!(
            virtual_to_real_path(root, "/home/user/file.txt").unwrap(),
            PathBuf::from("/tmp/work/home/user/file.txt")
        );
        assert_eq!(virtual_to_real_path(root, "/").unwrap(), PathBuf::from("/tmp/work"));
    }

    #[test]
    fn test_virtual_to_real_path_rejects_traversal() {
        let root = Path::new("/tmp/work");
        assert_eq!(
            virtual_to_real_path(root, "/../etc/passwd"),
            Err(PathError::PathTraversal("/../etc/passwd".into()))
        );
        assert!(virtual_to_real_path(root, "relative/path").is_err());
    }

    #[test]
    fn test_resolve_path_neutralizes_crafted_dotdot() {
        let root = Path::new("/tmp/work");
        let (real, virt) = resolve_path(root, "/home", "../../../../etc/passwd").unwrap();
        assert_eq!(virt, "/etc/passwd");
        assert!(real.starts_with(root));
    }
}
