//! Application configuration model.
//!
//! Stored as `config.toml`; every field has a default so a partial or
//! missing file still yields a usable configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_IMAGES_PER_BREED;
use crate::search::SEARCH_DEBOUNCE;

pub const DEFAULT_AUTH_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://api.thecatapi.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
}

/// Remote endpoints and credentials.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,
    #[serde(default = "default_catalog_base_url")]
    pub catalog_base_url: String,
    /// Static credential sent as `x-api-key` to the catalog.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Tuning of the breed browsing view.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BrowseConfig {
    #[serde(default = "default_images_per_breed")]
    pub images_per_breed: u32,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl BrowseConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            auth_base_url: default_auth_base_url(),
            catalog_base_url: default_catalog_base_url(),
            api_key: String::new(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            images_per_breed: default_images_per_breed(),
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

fn default_auth_base_url() -> String {
    DEFAULT_AUTH_BASE_URL.to_string()
}

fn default_catalog_base_url() -> String {
    DEFAULT_CATALOG_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_images_per_breed() -> u32 {
    DEFAULT_IMAGES_PER_BREED
}

fn default_search_debounce_ms() -> u64 {
    SEARCH_DEBOUNCE.as_millis() as u64
}
