use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::repositories::PokemonCatalog;
use crate::domain::team::TeamStore;

/// Shared handler state
///
/// The store sits behind one lock so each request's read-modify-persist
/// runs alone. Catalog calls happen outside the lock.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<TeamStore>>,
    pub catalog: Arc<dyn PokemonCatalog>,
}

impl AppState {
    pub fn new(store: TeamStore, catalog: Arc<dyn PokemonCatalog>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            catalog,
        }
    }
}
