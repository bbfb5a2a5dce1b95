use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::pokemon::{self, PageRequest, PageSummary, PokemonDetails, PokemonListItem};
use crate::domain::roster::{self, Availability};
use crate::domain::team::{Team, TeamId};

/// One listing row, annotated against the current team
#[derive(Debug, Serialize)]
pub struct PokemonRow {
    pub id: Option<u32>,
    pub name: String,
    pub url: String,
    pub sprite: Option<String>,
    /// `None` when there is no current team or the id is unknown
    pub team_status: Option<Availability>,
}

impl PokemonRow {
    fn new(item: PokemonListItem, current: Option<&Team>) -> Self {
        let id = item.id();
        let team_status = match (current, id) {
            (Some(team), Some(id)) => Some(roster::availability(team, id)),
            _ => None,
        };

        Self {
            id,
            sprite: item.sprite_url(),
            name: item.name,
            url: item.url,
            team_status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CurrentTeamSummary {
    pub id: TeamId,
    pub name: String,
    pub size: usize,
}

#[derive(Debug, Serialize)]
pub struct PokemonListResponse {
    pub results: Vec<PokemonRow>,
    pub page: PageSummary,
    pub current_team: Option<CurrentTeamSummary>,
}

/// List one page of the catalog
///
/// GET /api/pokemon?page=&rows_per_page=
pub async fn list_pokemon(
    State(state): State<AppState>,
    Query(request): Query<PageRequest>,
) -> Result<Json<PokemonListResponse>, ApiError> {
    request.validate()?;

    let page = state
        .catalog
        .list(request.offset(), request.limit())
        .await?;

    let store = state.store.lock().await;
    let current = store.current_team();
    let results = page
        .results
        .into_iter()
        .map(|item| PokemonRow::new(item, current))
        .collect();

    Ok(Json(PokemonListResponse {
        results,
        page: PageSummary::new(request, page.count),
        current_team: current.map(|team| CurrentTeamSummary {
            id: team.id().clone(),
            name: team.name().to_string(),
            size: team.pokemon().len(),
        }),
    }))
}

/// Look up one Pokémon by name or id
///
/// GET /api/pokemon/:name
pub async fn get_pokemon(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PokemonDetails>, ApiError> {
    let details = pokemon::search(state.catalog.as_ref(), &name).await?;
    Ok(Json(details))
}
