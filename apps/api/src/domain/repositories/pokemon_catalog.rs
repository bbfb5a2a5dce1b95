use async_trait::async_trait;
use thiserror::Error;

use crate::domain::pokemon::{PokemonDetails, PokemonPage};

/// Errors that can occur while querying the Pokémon catalog
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Pokémon not found: {0}")]
    NotFound(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Catalog returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Catalog request failed: {0}")]
    Http(String),

    #[error("Could not decode catalog response: {0}")]
    Decode(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Read-only access to a remote Pokémon catalog
///
/// Implementations fetch pages of names and full detail records.
#[async_trait]
pub trait PokemonCatalog: Send + Sync {
    /// Fetch one page of the catalog listing
    async fn list(&self, offset: u32, limit: u32) -> CatalogResult<PokemonPage>;

    /// Fetch the detail record for a name or numeric id
    async fn detail(&self, name_or_id: &str) -> CatalogResult<PokemonDetails>;
}
