use serde::{Deserialize, Serialize};

use super::default_sprite_url;

/// One row of the catalog listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonListItem {
    pub name: String,
    pub url: String,
}

impl PokemonListItem {
    /// Numeric id taken from the second-to-last path segment of `url`
    ///
    /// Catalog URLs end with a slash, e.g. `.../pokemon/25/`.
    pub fn id(&self) -> Option<u32> {
        let segments: Vec<&str> = self.url.split('/').collect();
        if segments.len() < 2 {
            return None;
        }
        segments[segments.len() - 2].parse().ok()
    }

    pub fn sprite_url(&self) -> Option<String> {
        self.id().map(default_sprite_url)
    }
}

/// One page of the catalog listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonPage {
    /// Total number of entries across all pages
    pub count: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<PokemonListItem>,
}
