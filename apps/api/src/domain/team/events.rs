use serde::Serialize;

use super::value_objects::TeamId;

/// Domain events emitted when the team collection changes
///
/// The store broadcasts these to subscribers after each mutation has been
/// persisted, so a subscriber that re-reads the store sees the new state.
///
/// # Example
/// ```
/// use pokedex_teams_api::domain::team::{TeamEvent, TeamId};
///
/// let event = TeamEvent::PokemonAdded {
///     team_id: TeamId::new("1700000000000"),
///     pokemon_id: 25,
/// };
/// assert_eq!(event.team_id().map(|id| id.as_str()), Some("1700000000000"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TeamEvent {
    /// Fired when a team is created
    Created {
        team_id: TeamId,
        name: String,
    },
    /// Fired when a team is removed from the collection
    Deleted {
        team_id: TeamId,
    },
    /// Fired when the current team changes, `None` meaning cleared
    CurrentChanged {
        team_id: Option<TeamId>,
    },
    /// Fired when a Pokémon joins a roster
    PokemonAdded {
        team_id: TeamId,
        pokemon_id: u32,
    },
    /// Fired when a Pokémon leaves a roster
    PokemonRemoved {
        team_id: TeamId,
        pokemon_id: u32,
    },
}

impl TeamEvent {
    /// Returns the team this event concerns, if any
    pub fn team_id(&self) -> Option<&TeamId> {
        match self {
            TeamEvent::Created { team_id, .. } => Some(team_id),
            TeamEvent::Deleted { team_id } => Some(team_id),
            TeamEvent::CurrentChanged { team_id } => team_id.as_ref(),
            TeamEvent::PokemonAdded { team_id, .. } => Some(team_id),
            TeamEvent::PokemonRemoved { team_id, .. } => Some(team_id),
        }
    }
}
