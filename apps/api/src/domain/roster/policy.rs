use serde::{Deserialize, Serialize};

use super::entry::RosterEntry;
use crate::domain::pokemon::{default_sprite_url, PokemonDetails};
use crate::domain::team::Team;

/// Maximum number of Pokémon a team may hold
pub const MAX_TEAM_SIZE: usize = 6;

/// Whether a Pokémon could join a team right now
///
/// `InTeam` wins over `TeamFull` when both apply, so a full team still
/// reports its own members as present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    InTeam,
    TeamFull,
}

impl Availability {
    pub fn is_available(self) -> bool {
        self == Availability::Available
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Available => write!(f, "available"),
            Availability::InTeam => write!(f, "in team"),
            Availability::TeamFull => write!(f, "team full"),
        }
    }
}

/// Classifies a Pokémon id against a team's roster
pub fn availability(team: &Team, pokemon_id: u32) -> Availability {
    if team.contains(pokemon_id) {
        Availability::InTeam
    } else if team.is_full() {
        Availability::TeamFull
    } else {
        Availability::Available
    }
}

/// Returns true if the roster has room and does not already hold `pokemon_id`
pub fn can_add(team: &Team, pokemon_id: u32) -> bool {
    availability(team, pokemon_id).is_available()
}

/// Shapes a catalog detail record into the compact roster representation
///
/// # Sprite selection
/// 1. Official artwork front image
/// 2. Default front sprite
/// 3. Sprite URL derived from the numeric id
///
/// Empty strings are treated as missing. A missing base experience maps to 0.
pub fn to_roster_entry(detail: &PokemonDetails) -> RosterEntry {
    let sprite = detail
        .official_artwork()
        .or_else(|| detail.front_sprite())
        .map(str::to_string)
        .unwrap_or_else(|| default_sprite_url(detail.id));

    RosterEntry {
        id: detail.id,
        name: detail.name.clone(),
        types: detail.type_names(),
        base_experience: detail.base_experience.unwrap_or(0),
        sprite,
    }
}
