//! Breed catalog port.

use async_trait::async_trait;

use super::model::{Breed, BreedImage};
use crate::error::Result;

/// Number of images the browsing view requests per selected breed.
pub const DEFAULT_IMAGES_PER_BREED: u32 = 5;

/// Number of temperament traits shown for a selected breed.
pub const TEMPERAMENT_PREVIEW_TRAITS: usize = 3;

/// Read access to the remote breed catalog.
///
/// Every call is a fresh request: implementations neither retry nor cache.
#[async_trait]
pub trait BreedCatalog: Send + Sync {
    /// Fetches the full breed collection as returned by the server.
    async fn list_breeds(&self) -> Result<Vec<Breed>>;

    /// Fetches a single breed.
    async fn breed_by_id(&self, breed_id: &str) -> Result<Breed>;

    /// Fetches up to `limit` images of one breed. `limit` must be positive.
    async fn breed_images(&self, breed_id: &str, limit: u32) -> Result<Vec<BreedImage>>;

    /// Server-side search passthrough.
    async fn search_breeds(&self, query: &str) -> Result<Vec<Breed>>;
}
