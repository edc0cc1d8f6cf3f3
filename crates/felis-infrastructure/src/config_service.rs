//! Configuration service implementation.
//!
//! Loads `AppConfig` from `~/.config/felis/config.toml` and layers the
//! `FELIS_*` environment overrides on top. A missing file yields defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use felis_core::config::AppConfig;
use felis_core::error::Result;

use crate::paths::FelisPaths;

pub const ENV_AUTH_URL: &str = "FELIS_AUTH_URL";
pub const ENV_CATALOG_URL: &str = "FELIS_CATALOG_URL";
pub const ENV_API_KEY: &str = "FELIS_API_KEY";

/// Configuration service that loads and caches the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    /// Cached configuration, filled on first access.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config file.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading `path` (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading it if not cached.
    ///
    /// A file that cannot be read or parsed is logged and replaced by
    /// defaults; environment overrides still apply.
    pub fn get_config(&self) -> AppConfig {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cached.as_ref() {
                return config.clone();
            }
        }

        let loaded = match self.load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("[ConfigService] Falling back to defaults: {}", e);
                with_env_overrides(AppConfig::default(), |key| std::env::var(key).ok())
            }
        };

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Reads the file and applies the process environment.
    pub fn load(&self) -> Result<AppConfig> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => FelisPaths::config_file()?,
        };
        let config = read_config_file(&path)?;
        Ok(with_env_overrides(config, |key| std::env::var(key).ok()))
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

fn read_config_file(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::debug!(
            "[ConfigService] No config file at {}, using defaults",
            path.display()
        );
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    tracing::debug!("[ConfigService] Loaded config from {}", path.display());
    Ok(config)
}

/// Applies `FELIS_AUTH_URL`, `FELIS_CATALOG_URL` and `FELIS_API_KEY`.
/// Empty values are ignored.
pub fn with_env_overrides(
    mut config: AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> AppConfig {
    let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = lookup(ENV_AUTH_URL) {
        config.api.auth_base_url = url;
    }
    if let Some(url) = lookup(ENV_CATALOG_URL) {
        config.api.catalog_base_url = url;
    }
    if let Some(key) = lookup(ENV_API_KEY) {
        config.api.api_key = key;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use felis_core::config::DEFAULT_CATALOG_BASE_URL;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = read_config_file(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [api]
            auth_base_url = "http://auth.local/api"

            [browse]
            images_per_breed = 8
            "#,
        )
        .unwrap();

        let config = read_config_file(&path).unwrap();
        assert_eq!(config.api.auth_base_url, "http://auth.local/api");
        assert_eq!(config.api.catalog_base_url, DEFAULT_CATALOG_BASE_URL);
        assert_eq!(config.browse.images_per_breed, 8);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[api\nbroken").unwrap();

        assert!(read_config_file(&path).unwrap_err().is_serialization());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_CATALOG_URL, "http://catalog.local"),
            (ENV_API_KEY, "live_key"),
            (ENV_AUTH_URL, "  "),
        ]);

        let config = with_env_overrides(AppConfig::default(), |key| {
            env.get(key).map(|v| v.to_string())
        });

        assert_eq!(config.api.catalog_base_url, "http://catalog.local");
        assert_eq!(config.api.api_key, "live_key");
        assert_eq!(
            config.api.auth_base_url,
            AppConfig::default().api.auth_base_url
        );
    }

    #[test]
    fn test_cache_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(path.clone());

        let first = service.get_config();
        fs::write(&path, "[browse]\nimages_per_breed = 2\n").unwrap();
        assert_eq!(service.get_config(), first);

        service.invalidate_cache();
        assert_eq!(service.get_config().browse.images_per_breed, 2);
    }
}
