//! Shell configuration
//!
//! Loads the settings named on the command line, with environment overrides.

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variables with this prefix override file values
/// (e.g. `VFS_SHELL_USERNAME`).
pub const ENV_PREFIX: &str = "VFS_SHELL";

/// Startup settings for one shell session
#[derive(Debug, Deserialize, Clone)]
pub struct ShellConfig {
    /// Name shown in the prompt and recorded in the session log
    pub username: String,

    /// Host name shown in the prompt
    pub hostname: String,

    /// Zip archive holding the virtual filesystem
    pub vfs_path: String,

    /// JSON file receiving the session log
    pub log_path: String,

    /// Script inside the archive run before the interactive loop
    #[serde(default)]
    pub startup_script: Option<String>,
}

impl ShellConfig {
    /// Load configuration from a TOML file with environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(true))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: ShellConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        let required = [
            ("username", &self.username),
            ("hostname", &self.hostname),
            ("vfs_path", &self.vfs_path),
            ("log_path", &self.log_path),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(config::ConfigError::Message(format!(
                    "{} cannot be empty",
                    key
                )));
            }
        }
        Ok(())
    }

    /// Get the archive path as PathBuf
    pub fn vfs_path(&self) -> PathBuf {
        PathBuf::from(&self.vfs_path)
    }

    /// Get the session log path as PathBuf
    pub fn log_path(&self) -> PathBuf {
        PathBuf::from(&self.log_path)
    }
}
