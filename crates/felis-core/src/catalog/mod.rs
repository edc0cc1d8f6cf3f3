//! Breed catalog domain module.
//!
//! - `model`: `Breed`, `BreedImage` and `BreedWeight`
//! - `service`: the `BreedCatalog` port implemented by the HTTP client

mod model;
mod service;

pub use model::{Breed, BreedImage, BreedWeight, truncate_text};
pub use service::{BreedCatalog, DEFAULT_IMAGES_PER_BREED, TEMPERAMENT_PREVIEW_TRAITS};
