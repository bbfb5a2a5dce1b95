use std::collections::HashSet;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{RosterError, TeamError, TeamResult};
use super::events::TeamEvent;
use super::value_objects::TeamId;
use crate::domain::roster::{self, Availability, RosterEntry, MAX_TEAM_SIZE};

/// Team aggregate root
///
/// A named roster of up to [`MAX_TEAM_SIZE`] Pokémon. Serializes to the
/// persisted layout `{id, name, pokemon, createdAt}`.
///
/// # Invariants
/// - Name is not empty after trimming
/// - Roster never exceeds [`MAX_TEAM_SIZE`] entries
/// - No two roster entries share an id
///
/// # Example
/// ```
/// use pokedex_teams_api::domain::team::{Team, TeamId};
///
/// let (team, events) = Team::new(TeamId::new("1"), "  Aces ").expect("valid team");
///
/// assert_eq!(team.name(), "Aces");
/// assert!(team.pokemon().is_empty());
/// assert_eq!(events.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Team {
    id: TeamId,
    name: String,
    pokemon: Vec<RosterEntry>,
    #[serde(rename = "createdAt", with = "millis_timestamp")]
    created_at: DateTime<Utc>,
}

impl Team {
    /// Creates an empty team
    ///
    /// # Returns
    /// * `Ok((Team, Vec<TeamEvent>))` - New team and the Created event
    /// * `Err(TeamError::InvalidArgument)` - If the name is blank
    pub fn new(id: TeamId, name: &str) -> TeamResult<(Self, Vec<TeamEvent>)> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TeamError::InvalidArgument(
                "Team name cannot be empty".to_string(),
            ));
        }

        let team = Self {
            id,
            name: name.to_string(),
            pokemon: Vec::new(),
            // stored with millisecond precision, truncate so reloads compare equal
            created_at: Utc::now().trunc_subsecs(3),
        };

        let events = vec![TeamEvent::Created {
            team_id: team.id.clone(),
            name: team.name.clone(),
        }];

        Ok((team, events))
    }

    /// Appends a Pokémon to the roster
    ///
    /// # Business Rules
    /// - The roster must have a free slot
    /// - The Pokémon must not already be on the roster
    pub fn add_pokemon(&mut self, entry: RosterEntry) -> Result<TeamEvent, RosterError> {
        match roster::availability(self, entry.id) {
            Availability::InTeam => Err(RosterError::Duplicate {
                team_id: self.id.clone(),
                pokemon_id: entry.id,
            }),
            Availability::TeamFull => Err(RosterError::Full {
                team_id: self.id.clone(),
                max: MAX_TEAM_SIZE,
            }),
            Availability::Available => {
                let pokemon_id = entry.id;
                self.pokemon.push(entry);
                Ok(TeamEvent::PokemonAdded {
                    team_id: self.id.clone(),
                    pokemon_id,
                })
            }
        }
    }

    /// Removes a Pokémon from the roster, returning `None` if it was absent
    pub fn remove_pokemon(&mut self, pokemon_id: u32) -> Option<TeamEvent> {
        let position = self.pokemon.iter().position(|p| p.id == pokemon_id)?;
        self.pokemon.remove(position);

        Some(TeamEvent::PokemonRemoved {
            team_id: self.id.clone(),
            pokemon_id,
        })
    }

    /// Checks the team invariants on data that bypassed [`Team::new`]
    pub fn check_invariants(&self) -> TeamResult<()> {
        if self.name.trim().is_empty() {
            return Err(TeamError::CorruptState(format!(
                "team {} has a blank name",
                self.id
            )));
        }

        if self.pokemon.len() > MAX_TEAM_SIZE {
            return Err(TeamError::CorruptState(format!(
                "team {} holds {} Pokémon",
                self.id,
                self.pokemon.len()
            )));
        }

        let mut seen = HashSet::new();
        for entry in &self.pokemon {
            if !seen.insert(entry.id) {
                return Err(TeamError::CorruptState(format!(
                    "team {} lists Pokémon {} twice",
                    self.id, entry.id
                )));
            }
        }

        Ok(())
    }

    // ===== Getters =====

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Roster in the order Pokémon were added
    pub fn pokemon(&self) -> &[RosterEntry] {
        &self.pokemon
    }

    pub fn contains(&self, pokemon_id: u32) -> bool {
        self.pokemon.iter().any(|p| p.id == pokemon_id)
    }

    pub fn is_full(&self) -> bool {
        self.pokemon.len() >= MAX_TEAM_SIZE
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reconstructs a Team from already-stored data
    ///
    /// Bypasses validation; callers loading untrusted data should follow up
    /// with [`Team::check_invariants`].
    pub fn from_persistence(
        id: TeamId,
        name: String,
        pokemon: Vec<RosterEntry>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            pokemon,
            created_at,
        }
    }
}

/// RFC 3339 timestamps with millisecond precision and a `Z` suffix
mod millis_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
