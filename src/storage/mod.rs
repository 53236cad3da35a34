//! Working-area storage
//!
//! Handles the archive lifecycle, the entry index, path resolution, and the
//! file operations commands perform inside the working area.

pub mod archive;
pub mod filesystem;
pub mod index;
pub mod validation;

pub use archive::Workspace;
pub use index::VfsIndex;
pub use validation::{VIRTUAL_ROOT, normalize_path, resolve_path, virtual_to_real_path};
