// PokéAPI adapter for the catalog port

pub mod client;

pub use client::{PokeApiClient, DEFAULT_BASE_URL};
