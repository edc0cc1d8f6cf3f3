//! CatalogClient - REST client for the breed catalog.
//!
//! Every request carries the static `x-api-key` credential. When a session
//! is published its token is added as a bearer `authorization` header; the
//! token is read from the session store per request, never cached here.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use felis_core::catalog::{Breed, BreedCatalog, BreedImage};
use felis_core::config::ApiConfig;
use felis_core::error::{FelisError, Result};
use felis_core::session::SessionStore;
use reqwest::{Client, IntoUrl, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::http::{build_client, endpoint, parse_json, success_body, transport_error};

const API_KEY_HEADER: &str = "x-api-key";

/// Breed catalog reached over HTTP.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
    api_key: String,
    session: Arc<SessionStore>,
}

impl CatalogClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
        session: Arc<SessionStore>,
    ) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
            api_key: api_key.into(),
            session,
        })
    }

    pub fn from_config(config: &ApiConfig, session: Arc<SessionStore>) -> Result<Self> {
        Self::new(
            config.catalog_base_url.clone(),
            config.api_key.clone(),
            config.request_timeout(),
            session,
        )
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.get_url(endpoint(&self.base_url, path))
    }

    /// `{base}/breeds/{id}` with `id` percent-encoded as one path segment.
    fn breed_url(&self, breed_id: &str) -> Result<Url> {
        let mut url = Url::parse(&endpoint(&self.base_url, "/breeds"))
            .map_err(|e| FelisError::config(format!("Invalid catalog URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| FelisError::config("Catalog URL cannot have path segments"))?
            .push(breed_id);
        Ok(url)
    }

    fn get_url(&self, url: impl IntoUrl + std::fmt::Display) -> RequestBuilder {
        tracing::debug!("[CatalogClient] GET {}", url);

        let request = self
            .client
            .get(url)
            .header(API_KEY_HEADER, self.api_key.as_str());

        match self.session.current_token() {
            Some(token) if !token.is_empty() => request.bearer_auth(token),
            _ => request,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|err| transport_error(err, "CatalogClient"))?;
        let body = success_body(response, "CatalogClient").await?;
        parse_json(&body)
    }
}

#[async_trait]
impl BreedCatalog for CatalogClient {
    async fn list_breeds(&self) -> Result<Vec<Breed>> {
        let breeds: Vec<Breed> = self.fetch(self.get("/breeds")).await?;
        tracing::debug!("[CatalogClient] Fetched {} breeds", breeds.len());
        Ok(breeds)
    }

    async fn breed_by_id(&self, breed_id: &str) -> Result<Breed> {
        if breed_id.trim().is_empty() {
            return Err(FelisError::validation("breed id must not be empty"));
        }
        let url = self.breed_url(breed_id.trim())?;
        self.fetch(self.get_url(url)).await
    }

    async fn breed_images(&self, breed_id: &str, limit: u32) -> Result<Vec<BreedImage>> {
        if limit == 0 {
            return Err(FelisError::validation("image limit must be positive"));
        }
        let limit = limit.to_string();
        let request = self
            .get("/images/imagesbybreedid")
            .query(&[("breed_id", breed_id), ("limit", limit.as_str())]);
        self.fetch(request).await
    }

    async fn search_breeds(&self, query: &str) -> Result<Vec<Breed>> {
        let request = self.get("/breeds/search").query(&[("q", query)]);
        self.fetch(request).await
    }
}
