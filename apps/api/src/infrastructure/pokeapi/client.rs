use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::pokemon::{PokemonDetails, PokemonPage};
use crate::domain::repositories::{CatalogError, CatalogResult, PokemonCatalog};

/// Public PokéAPI endpoint for the Pokémon resource
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// HTTP implementation of PokemonCatalog backed by PokéAPI
///
/// Requests are made once; there is no retry or caching.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: Client,
    base_url: String,
}

impl PokeApiClient {
    /// Creates a client for the given resource URL
    ///
    /// # Arguments
    /// * `base_url` - URL of the `pokemon` resource, trailing slash optional
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn detail_url(&self, name_or_id: &str) -> String {
        format!("{}/{}", self.base_url, name_or_id)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        subject: &str,
    ) -> CatalogResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::Http(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(subject.to_string()));
        }
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl PokemonCatalog for PokeApiClient {
    async fn list(&self, offset: u32, limit: u32) -> CatalogResult<PokemonPage> {
        tracing::info!("Fetching Pokémon page offset={} limit={}", offset, limit);

        let request = self
            .http
            .get(&self.base_url)
            .query(&[("offset", offset), ("limit", limit)]);

        self.fetch_json(request, "listing").await.map_err(|e| {
            tracing::error!("Catalog listing failed: {}", e);
            e
        })
    }

    async fn detail(&self, name_or_id: &str) -> CatalogResult<PokemonDetails> {
        tracing::info!("Fetching Pokémon details for {}", name_or_id);

        let request = self.http.get(self.detail_url(name_or_id));
        self.fetch_json(request, name_or_id).await
    }
}
