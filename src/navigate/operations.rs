//! Navigation operations implementation

use crate::error::NavigateError;
use crate::storage::VfsIndex;
use crate::storage::validation::{normalize_path, parent_path};

/// Resolves the new working directory for `cd`.
///
/// `..` steps to the parent (staying put at the root). Any other target is
/// normalized against the current directory and must name a directory in the
/// index. The returned path never carries a trailing slash, except the root.
pub fn change_directory(
    index: &VfsIndex,
    current_virtual_path: &str,
    target_path: &str,
) -> Result<String, NavigateError> {
    if target_path == ".." {
        return Ok(parent_path(current_virtual_path));
    }

    let new_virtual_path = normalize_path(target_path, current_virtual_path);
    if !index.is_directory(&new_virtual_path) {
        return Err(NavigateError::DirectoryNotFound(new_virtual_path));
    }

    Ok(new_virtual_path)
}
