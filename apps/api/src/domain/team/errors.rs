use thiserror::Error;

use super::value_objects::TeamId;

/// Errors raised by the team aggregate and its persistence format
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TeamError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Corrupt team state: {0}")]
    CorruptState(String),
}

pub type TeamResult<T> = Result<T, TeamError>;

/// Reasons a roster refuses a new entry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("Team {team_id} already has the maximum of {max} Pokémon")]
    Full { team_id: TeamId, max: usize },

    #[error("Pokémon {pokemon_id} is already on team {team_id}")]
    Duplicate { team_id: TeamId, pokemon_id: u32 },
}
