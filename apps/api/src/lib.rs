//! Pokédex Teams API Library
//!
//! Team-builder core for a Pokémon catalog: the team store and roster
//! policy, storage and catalog adapters, and the HTTP API over them.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
