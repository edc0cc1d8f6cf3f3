//! Breed catalog models.
//!
//! Field names follow the catalog API payloads (snake_case). String fields
//! that the API occasionally omits default to empty.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BreedWeight {
    #[serde(default)]
    pub imperial: String,
    #[serde(default)]
    pub metric: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BreedImage {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Breed {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub origin: String,
    /// Comma-delimited trait list, e.g. `"Calm, Affectionate"`.
    #[serde(default)]
    pub temperament: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub life_span: String,
    #[serde(default)]
    pub weight: BreedWeight,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<BreedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<BreedImage>>,
}

impl Breed {
    /// Case-insensitive substring match against name, origin and temperament.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        [&self.name, &self.origin, &self.temperament]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    /// The first `limit` temperament traits, trimmed.
    pub fn temperament_traits(&self, limit: usize) -> Vec<&str> {
        self.temperament
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .take(limit)
            .collect()
    }
}

/// Cuts `text` to `max_chars` characters and appends `...` when it was longer.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
