//! Navigate module
//!
//! Handles directory navigation within the virtual filesystem,
//! including changing directories and stepping up to the parent.

mod operations;

// Re-export public types and functions
pub use operations::change_directory;
