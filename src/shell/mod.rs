//! Shell core functionality
//!
//! This module contains the session runner, its configuration, and the
//! startup/shutdown sequence around the virtual filesystem.

pub mod config;
pub mod core;

pub use self::config::ShellConfig;
pub use self::core::Shell;
