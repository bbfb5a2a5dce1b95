use std::net::SocketAddr;
use std::path::PathBuf;

use crate::infrastructure::pokeapi::DEFAULT_BASE_URL;

const DEFAULT_DATA_DIR: &str = "./data";

/// Runtime settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// URL of the PokéAPI `pokemon` resource
    pub pokeapi_base_url: String,
    /// Directory holding the persisted team blob
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Reads `POKEAPI_BASE_URL`, `TEAMS_DATA_DIR` and `BIND_ADDR`
    ///
    /// Missing or unparseable values fall back to defaults with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pokeapi_base_url = lookup("POKEAPI_BASE_URL").unwrap_or_else(|| {
            tracing::warn!("POKEAPI_BASE_URL not set, using default");
            DEFAULT_BASE_URL.to_string()
        });

        let data_dir = lookup("TEAMS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                tracing::warn!("TEAMS_DATA_DIR not set, using {}", DEFAULT_DATA_DIR);
                PathBuf::from(DEFAULT_DATA_DIR)
            });

        let bind_addr = lookup("BIND_ADDR")
            .and_then(|raw| match raw.parse() {
                Ok(addr) => Some(addr),
                Err(e) => {
                    tracing::warn!("Ignoring invalid BIND_ADDR {:?}: {}", raw, e);
                    None
                }
            })
            .unwrap_or_else(default_bind_addr);

        Self {
            pokeapi_base_url,
            data_dir,
            bind_addr,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}
