// Ports implemented by infrastructure adapters

pub mod key_value_store;
pub mod pokemon_catalog;

pub use key_value_store::{KeyValueStore, StorageError};
pub use pokemon_catalog::{CatalogError, CatalogResult, PokemonCatalog};
