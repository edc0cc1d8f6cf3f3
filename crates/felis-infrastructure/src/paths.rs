//! Unified path management for felis files.
//!
//! ```text
//! ~/.config/felis/             # Config directory
//! └── config.toml              # Endpoints, API key, browsing options
//!
//! ~/.local/share/felis/        # Data directory
//! └── local_storage.json       # Persisted session (token + user)
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "felis";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for felis_core::FelisError {
    fn from(err: PathError) -> Self {
        felis_core::FelisError::config(err.to_string())
    }
}

/// Platform paths for felis (XDG on Linux, the native locations elsewhere).
pub struct FelisPaths;

impl FelisPaths {
    /// Returns the felis configuration directory (e.g. `~/.config/felis/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the felis data directory (e.g. `~/.local/share/felis/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path of the persisted local storage.
    pub fn local_storage_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("local_storage.json"))
    }
}
