use super::PokemonDetails;
use crate::domain::repositories::{CatalogError, CatalogResult, PokemonCatalog};

/// Normalizes a user-entered search term for catalog lookup
///
/// The catalog only matches exact lowercase names or numeric ids.
pub fn normalize_search_term(term: &str) -> CatalogResult<String> {
    let normalized = term.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(CatalogError::InvalidQuery(
            "search term cannot be empty".to_string(),
        ));
    }
    Ok(normalized)
}

/// Looks up a single Pokémon by name or id
pub async fn search(catalog: &dyn PokemonCatalog, term: &str) -> CatalogResult<PokemonDetails> {
    let term = normalize_search_term(term)?;
    tracing::debug!(term = %term, "Searching catalog");
    catalog.detail(&term).await
}
