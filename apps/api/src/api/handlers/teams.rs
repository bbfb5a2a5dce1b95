use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::pokemon;
use crate::domain::roster::{self, Availability, TeamStats};
use crate::domain::team::{AddOutcome, Team, TeamId, TeamStore};

/// Request body for creating a team
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
}

/// Request body for selecting the current team
#[derive(Debug, Deserialize)]
pub struct SetCurrentTeamRequest {
    pub team_id: Option<TeamId>,
}

/// Request body for adding a Pokémon, by name or numeric id
#[derive(Debug, Deserialize)]
pub struct AddPokemonRequest {
    pub pokemon: String,
}

/// Every team plus the current selection
#[derive(Debug, Serialize)]
pub struct TeamsResponse {
    pub teams: Vec<Team>,
    pub current_team_id: Option<TeamId>,
}

#[derive(Debug, Serialize)]
pub struct CurrentTeamResponse {
    pub current_team_id: Option<TeamId>,
}

/// A team with its derived statistics
#[derive(Debug, Serialize)]
pub struct TeamDetailResponse {
    pub team: Team,
    pub stats: TeamStats,
}

impl TeamDetailResponse {
    fn new(store: &TeamStore, team: &Team) -> Self {
        Self {
            team: team.clone(),
            stats: store.get_team_stats(team),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub can_add: bool,
    pub status: Availability,
}

fn team_not_found(id: &TeamId) -> ApiError {
    ApiError::not_found(format!("Team not found: {}", id))
}

/// List all teams
///
/// GET /api/teams
pub async fn list_teams(State(state): State<AppState>) -> Json<TeamsResponse> {
    let store = state.store.lock().await;

    Json(TeamsResponse {
        teams: store.teams().to_vec(),
        current_team_id: store.current_team_id().cloned(),
    })
}

/// Create a new team and make it current
///
/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<Team>), ApiError> {
    let mut store = state.store.lock().await;
    let team = store.create_team(&req.name)?;

    Ok((StatusCode::CREATED, Json(team)))
}

/// Get a team with its stats
///
/// GET /api/teams/:id
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
) -> Result<Json<TeamDetailResponse>, ApiError> {
    let store = state.store.lock().await;
    let team = store.team(&id).ok_or_else(|| team_not_found(&id))?;

    Ok(Json(TeamDetailResponse::new(&store, team)))
}

/// Delete a team; deleting an unknown id succeeds
///
/// DELETE /api/teams/:id
pub async fn delete_team(State(state): State<AppState>, Path(id): Path<TeamId>) -> StatusCode {
    state.store.lock().await.delete_team(&id);
    StatusCode::NO_CONTENT
}

/// Get the current team with its stats
///
/// GET /api/teams/current
pub async fn get_current_team(
    State(state): State<AppState>,
) -> Result<Json<TeamDetailResponse>, ApiError> {
    let store = state.store.lock().await;
    let team = store
        .current_team()
        .ok_or_else(|| ApiError::not_found("No current team"))?;

    Ok(Json(TeamDetailResponse::new(&store, team)))
}

/// Select or clear the current team
///
/// PUT /api/teams/current
pub async fn set_current_team(
    State(state): State<AppState>,
    Json(req): Json<SetCurrentTeamRequest>,
) -> Result<Json<CurrentTeamResponse>, ApiError> {
    let mut store = state.store.lock().await;
    if let Some(id) = &req.team_id {
        if store.team(id).is_none() {
            return Err(team_not_found(id));
        }
    }
    store.set_current_team(req.team_id);

    Ok(Json(CurrentTeamResponse {
        current_team_id: store.current_team_id().cloned(),
    }))
}

/// Get the stats of a team
///
/// GET /api/teams/:id/stats
pub async fn get_team_stats(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
) -> Result<Json<TeamStats>, ApiError> {
    let store = state.store.lock().await;
    let team = store.team(&id).ok_or_else(|| team_not_found(&id))?;

    Ok(Json(store.get_team_stats(team)))
}

/// Check whether a Pokémon could join a team
///
/// GET /api/teams/:id/pokemon/:pokemon_id/availability
pub async fn pokemon_availability(
    State(state): State<AppState>,
    Path((id, pokemon_id)): Path<(TeamId, u32)>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let store = state.store.lock().await;
    let team = store.team(&id).ok_or_else(|| team_not_found(&id))?;

    Ok(Json(AvailabilityResponse {
        can_add: store.can_add_pokemon(&id, pokemon_id),
        status: roster::availability(team, pokemon_id),
    }))
}

/// Fetch a Pokémon from the catalog and add it to a team
///
/// POST /api/teams/:id/pokemon
pub async fn add_pokemon(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
    Json(req): Json<AddPokemonRequest>,
) -> Result<Json<Team>, ApiError> {
    if state.store.lock().await.team(&id).is_none() {
        return Err(team_not_found(&id));
    }

    // fetch without holding the store lock
    let details = pokemon::search(state.catalog.as_ref(), &req.pokemon).await?;

    let mut store = state.store.lock().await;
    match store.add_pokemon_to_team(&id, &details) {
        AddOutcome::Added => {
            let team = store.team(&id).ok_or_else(|| team_not_found(&id))?;
            Ok(Json(team.clone()))
        }
        AddOutcome::AlreadyInTeam => Err(ApiError::conflict(format!(
            "{} is already on team {}",
            details.name, id
        ))),
        AddOutcome::TeamFull => Err(ApiError::conflict(format!(
            "Team {} already has {} Pokémon",
            id,
            roster::MAX_TEAM_SIZE
        ))),
        AddOutcome::TeamNotFound => Err(team_not_found(&id)),
    }
}

/// Remove a Pokémon from a team
///
/// DELETE /api/teams/:id/pokemon/:pokemon_id
pub async fn remove_pokemon(
    State(state): State<AppState>,
    Path((id, pokemon_id)): Path<(TeamId, u32)>,
) -> StatusCode {
    state
        .store
        .lock()
        .await
        .remove_pokemon_from_team(&id, pokemon_id);
    StatusCode::NO_CONTENT
}
