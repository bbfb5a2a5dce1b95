use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use super::errors::{RosterError, TeamError, TeamResult};
use super::events::TeamEvent;
use super::team::Team;
use super::value_objects::{TeamId, TeamIdGenerator};
use crate::domain::pokemon::PokemonDetails;
use crate::domain::repositories::KeyValueStore;
use crate::domain::roster::{self, TeamStats};

/// Storage key holding the serialized team collection
pub const STORAGE_KEY: &str = "pokemon-teams";

const EVENT_CAPACITY: usize = 64;

/// Result of [`TeamStore::add_pokemon_to_team`]
///
/// Only `Added` changes state; the other variants are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    Added,
    AlreadyInTeam,
    TeamFull,
    TeamNotFound,
}

/// Owns the team collection and the current-team selection
///
/// Every mutation is written through to the [`KeyValueStore`] as the full
/// collection before the call returns. Storage failures are logged and
/// never reach the caller. The current team is kept as an id and resolved
/// on read, so deleting a team can never leave it dangling.
///
/// The store is single-actor; wrap it in a lock to share it.
pub struct TeamStore {
    storage: Arc<dyn KeyValueStore>,
    teams: Vec<Team>,
    current: Option<TeamId>,
    ids: TeamIdGenerator,
    events: broadcast::Sender<TeamEvent>,
}

impl TeamStore {
    /// Creates an empty store that has not read storage yet
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            storage,
            teams: Vec::new(),
            current: None,
            ids: TeamIdGenerator::new(),
            events,
        }
    }

    /// Creates a store and loads any persisted teams
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        let mut store = Self::new(storage);
        store.initialize();
        store
    }

    /// Loads the persisted collection
    ///
    /// A missing blob leaves the store empty. A blob that fails to parse or
    /// breaks the team invariants is removed from storage and the store
    /// starts empty. When teams load and no current team resolves, the
    /// first team becomes current.
    pub fn initialize(&mut self) {
        let blob = match self.storage.get(STORAGE_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!("No persisted teams found");
                return;
            }
            Err(e) => {
                error!("Failed to read persisted teams: {}", e);
                return;
            }
        };

        match decode_collection(&blob) {
            Ok(teams) => {
                for team in &teams {
                    self.ids.observe(team.id());
                }
                self.teams = teams;
                if self.current_team().is_none() {
                    self.current = self.teams.first().map(|t| t.id().clone());
                }
                info!("Loaded {} persisted teams", self.teams.len());
            }
            Err(e) => {
                warn!("Discarding persisted teams: {}", e);
                if let Err(e) = self.storage.remove(STORAGE_KEY) {
                    error!("Failed to clear persisted teams: {}", e);
                }
            }
        }
    }

    /// Subscribes to change events
    pub fn subscribe(&self) -> broadcast::Receiver<TeamEvent> {
        self.events.subscribe()
    }

    // ===== Reads =====

    /// All teams in creation order
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, team_id: &TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id() == team_id)
    }

    /// The current team, if one is set and still exists
    pub fn current_team(&self) -> Option<&Team> {
        self.current.as_ref().and_then(|id| self.team(id))
    }

    pub fn current_team_id(&self) -> Option<&TeamId> {
        self.current_team().map(Team::id)
    }

    /// True iff the team exists, has room, and does not hold `pokemon_id`
    pub fn can_add_pokemon(&self, team_id: &TeamId, pokemon_id: u32) -> bool {
        self.team(team_id)
            .map(|team| roster::can_add(team, pokemon_id))
            .unwrap_or(false)
    }

    pub fn get_team_stats(&self, team: &Team) -> TeamStats {
        roster::compute_stats(team)
    }

    // ===== Mutations =====

    /// Creates a team, makes it current and persists
    ///
    /// # Errors
    /// `TeamError::InvalidArgument` if `name` is blank.
    pub fn create_team(&mut self, name: &str) -> TeamResult<Team> {
        let id = self.ids.next_at(Utc::now());
        let (team, events) = Team::new(id, name)?;

        info!("Creating team {} ({})", team.name(), team.id());
        self.teams.push(team.clone());
        self.current = Some(team.id().clone());
        self.persist();

        for event in events {
            self.publish(event);
        }
        self.publish(TeamEvent::CurrentChanged {
            team_id: Some(team.id().clone()),
        });

        Ok(team)
    }

    /// Deletes a team if present; clears the current team if it was current
    pub fn delete_team(&mut self, team_id: &TeamId) {
        let before = self.teams.len();
        self.teams.retain(|t| t.id() != team_id);
        if self.teams.len() == before {
            debug!("Delete ignored, team {} not found", team_id);
            return;
        }

        info!("Deleted team {}", team_id);
        let was_current = self.current.as_ref() == Some(team_id);
        if was_current {
            self.current = None;
        }
        self.persist();

        self.publish(TeamEvent::Deleted {
            team_id: team_id.clone(),
        });
        if was_current {
            self.publish(TeamEvent::CurrentChanged { team_id: None });
        }
    }

    /// Sets or clears the current team
    ///
    /// The id is not checked; an unknown id reads back as no current team.
    pub fn set_current_team(&mut self, team_id: Option<TeamId>) {
        if self.current == team_id {
            return;
        }
        debug!("Current team set to {:?}", team_id);
        self.current = team_id.clone();
        self.publish(TeamEvent::CurrentChanged { team_id });
    }

    /// Adds a Pokémon to a team's roster
    ///
    /// Missing teams, duplicates and full rosters leave the store unchanged;
    /// the returned outcome says which case applied.
    pub fn add_pokemon_to_team(&mut self, team_id: &TeamId, details: &PokemonDetails) -> AddOutcome {
        let Some(team) = self.teams.iter_mut().find(|t| t.id() == team_id) else {
            debug!("Add ignored, team {} not found", team_id);
            return AddOutcome::TeamNotFound;
        };

        let entry = roster::to_roster_entry(details);
        let event = match team.add_pokemon(entry) {
            Ok(event) => event,
            Err(e @ RosterError::Duplicate { .. }) => {
                warn!("Add rejected: {}", e);
                return AddOutcome::AlreadyInTeam;
            }
            Err(e @ RosterError::Full { .. }) => {
                warn!("Add rejected: {}", e);
                return AddOutcome::TeamFull;
            }
        };

        info!("Added {} ({}) to team {}", details.name, details.id, team_id);
        self.persist();
        self.publish(event);
        AddOutcome::Added
    }

    /// Removes a Pokémon from a team's roster if present
    pub fn remove_pokemon_from_team(&mut self, team_id: &TeamId, pokemon_id: u32) {
        let event = self
            .teams
            .iter_mut()
            .find(|t| t.id() == team_id)
            .and_then(|team| team.remove_pokemon(pokemon_id));

        let Some(event) = event else {
            debug!("Remove ignored, Pokémon {} not on team {}", pokemon_id, team_id);
            return;
        };

        info!("Removed Pokémon {} from team {}", pokemon_id, team_id);
        self.persist();
        self.publish(event);
    }

    // ===== Internals =====

    fn persist(&self) {
        let blob = match serde_json::to_string(&self.teams) {
            Ok(blob) => blob,
            Err(e) => {
                error!("Failed to serialize teams: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set(STORAGE_KEY, &blob) {
            error!("Failed to persist teams: {}", e);
        }
    }

    fn publish(&self, event: TeamEvent) {
        // no receivers is fine
        let _ = self.events.send(event);
    }
}

/// Parses a persisted collection and checks its invariants
pub fn decode_collection(blob: &str) -> TeamResult<Vec<Team>> {
    let teams: Vec<Team> =
        serde_json::from_str(blob).map_err(|e| TeamError::CorruptState(e.to_string()))?;

    let mut ids = HashSet::new();
    for team in &teams {
        team.check_invariants()?;
        if !ids.insert(team.id().clone()) {
            return Err(TeamError::CorruptState(format!(
                "team id {} appears twice",
                team.id()
            )));
        }
    }

    Ok(teams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pokemon::{NamedResource, TypeSlot};
    use crate::infrastructure::storage::MemoryStore;

    fn details(id: u32, name: &str, types: &[&str], base_experience: u32) -> PokemonDetails {
        PokemonDetails {
            id,
            name: name.to_string(),
            base_experience: Some(base_experience),
            types: types
                .iter()
                .enumerate()
                .map(|(i, t)| TypeSlot {
                    slot: i as u32 + 1,
                    kind: NamedResource::named(*t),
                })
                .collect(),
            ..PokemonDetails::default()
        }
    }

    fn pikachu() -> PokemonDetails {
        details(25, "pikachu", &["electric"], 112)
    }

    fn charizard() -> PokemonDetails {
        details(6, "charizard", &["fire", "flying"], 267)
    }

    fn store() -> (TeamStore, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        (TeamStore::open(storage.clone()), storage)
    }

    #[test]
    fn starts_empty_without_persisted_state() {
        let (store, _) = store();

        assert!(store.teams().is_empty());
        assert!(store.current_team().is_none());
    }

    #[test]
    fn create_team_sets_current_and_persists() {
        let (mut store, storage) = store();

        let team = store.create_team("Aces").unwrap();

        assert_eq!(store.teams().len(), 1);
        assert_eq!(store.current_team_id(), Some(team.id()));
        let blob = storage.get(STORAGE_KEY).unwrap().unwrap();
        assert!(blob.contains("\"Aces\""));
    }

    #[test]
    fn create_team_with_blank_name_changes_nothing() {
        let (mut store, storage) = store();

        let result = store.create_team("  ");

        assert!(matches!(result, Err(TeamError::InvalidArgument(_))));
        assert!(store.teams().is_empty());
        assert!(storage.get(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn created_ids_are_unique() {
        let (mut store, _) = store();

        let a = store.create_team("A").unwrap();
        let b = store.create_team("B").unwrap();

        assert_ne!(a.id(), b.id());
        assert_eq!(store.current_team_id(), Some(b.id()));
    }

    #[test]
    fn add_pokemon_builds_roster_entry() {
        let (mut store, _) = store();
        let team = store.create_team("Aces").unwrap();

        let outcome = store.add_pokemon_to_team(team.id(), &pikachu());

        assert_eq!(outcome, AddOutcome::Added);
        let roster = store.team(team.id()).unwrap().pokemon();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "pikachu");
        assert_eq!(roster[0].types, vec!["electric"]);
    }

    #[test]
    fn add_to_missing_team_is_noop() {
        let (mut store, storage) = store();

        let outcome = store.add_pokemon_to_team(&TeamId::new("missing"), &pikachu());

        assert_eq!(outcome, AddOutcome::TeamNotFound);
        assert!(storage.get(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn add_duplicate_is_noop() {
        let (mut store, _) = store();
        let team = store.create_team("Aces").unwrap();
        store.add_pokemon_to_team(team.id(), &pikachu());

        let outcome = store.add_pokemon_to_team(team.id(), &pikachu());

        assert_eq!(outcome, AddOutcome::AlreadyInTeam);
        assert_eq!(store.team(team.id()).unwrap().pokemon().len(), 1);
    }

    #[test]
    fn roster_never_exceeds_six() {
        let (mut store, _) = store();
        let team = store.create_team("Big").unwrap();

        for id in 1..=10 {
            store.add_pokemon_to_team(team.id(), &details(id, "p", &["normal"], 50));
        }

        let roster = store.team(team.id()).unwrap().pokemon();
        assert_eq!(roster.len(), 6);
        let ids: Vec<u32> = roster.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(
            store.add_pokemon_to_team(team.id(), &details(11, "p", &[], 1)),
            AddOutcome::TeamFull
        );
    }

    #[test]
    fn duplicate_on_full_team_reports_already_in_team() {
        let (mut store, _) = store();
        let team = store.create_team("Big").unwrap();
        for id in 1..=6 {
            store.add_pokemon_to_team(team.id(), &details(id, "p", &["normal"], 50));
        }

        assert_eq!(
            store.add_pokemon_to_team(team.id(), &details(3, "p", &["normal"], 50)),
            AddOutcome::AlreadyInTeam
        );
        assert_eq!(
            store.add_pokemon_to_team(team.id(), &details(7, "p", &["normal"], 50)),
            AddOutcome::TeamFull
        );
    }

    #[test]
    fn can_add_pokemon_matches_add_effect() {
        let (mut store, _) = store();
        let team = store.create_team("Aces").unwrap();
        let missing = TeamId::new("missing");

        for id in [1, 2, 1, 3, 4, 5, 2, 6, 7] {
            let predicted = store.can_add_pokemon(team.id(), id);
            let before = store.team(team.id()).unwrap().pokemon().len();
            store.add_pokemon_to_team(team.id(), &details(id, "p", &[], 1));
            let after = store.team(team.id()).unwrap().pokemon().len();

            assert_eq!(predicted, after > before, "pokemon {}", id);
        }

        assert!(!store.can_add_pokemon(&missing, 1));
    }

    #[test]
    fn remove_pokemon_from_team() {
        let (mut store, _) = store();
        let team = store.create_team("Aces").unwrap();
        store.add_pokemon_to_team(team.id(), &pikachu());
        store.add_pokemon_to_team(team.id(), &charizard());

        store.remove_pokemon_from_team(team.id(), 25);

        let roster = store.team(team.id()).unwrap().pokemon();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, 6);
    }

    #[test]
    fn remove_missing_pokemon_is_noop() {
        let (mut store, _) = store();
        let team = store.create_team("Aces").unwrap();

        store.remove_pokemon_from_team(team.id(), 25);
        store.remove_pokemon_from_team(&TeamId::new("missing"), 25);

        assert!(store.team(team.id()).unwrap().pokemon().is_empty());
    }

    #[test]
    fn deleting_current_team_clears_current() {
        let (mut store, _) = store();
        let first = store.create_team("First").unwrap();
        let second = store.create_team("Second").unwrap();

        store.delete_team(second.id());

        assert!(store.current_team().is_none());
        assert_eq!(store.teams().len(), 1);
        assert_eq!(store.teams()[0].id(), first.id());
    }

    #[test]
    fn deleting_other_team_keeps_current() {
        let (mut store, _) = store();
        let first = store.create_team("First").unwrap();
        let second = store.create_team("Second").unwrap();

        store.delete_team(first.id());

        assert_eq!(store.current_team_id(), Some(second.id()));
    }

    #[test]
    fn deleting_unknown_team_leaves_state_unchanged() {
        let (mut store, storage) = store();
        let team = store.create_team("Aces").unwrap();
        let blob_before = storage.get(STORAGE_KEY).unwrap();

        store.delete_team(&TeamId::new("missing"));

        assert_eq!(store.teams().len(), 1);
        assert_eq!(store.current_team_id(), Some(team.id()));
        assert_eq!(storage.get(STORAGE_KEY).unwrap(), blob_before);
    }

    #[test]
    fn dangling_current_reads_as_none() {
        let (mut store, _) = store();
        store.create_team("Aces").unwrap();

        store.set_current_team(Some(TeamId::new("ghost")));

        assert!(store.current_team().is_none());
        assert!(store.current_team_id().is_none());
    }

    #[test]
    fn set_current_team_switches_and_clears() {
        let (mut store, _) = store();
        let first = store.create_team("First").unwrap();
        store.create_team("Second").unwrap();

        store.set_current_team(Some(first.id().clone()));
        assert_eq!(store.current_team_id(), Some(first.id()));

        store.set_current_team(None);
        assert!(store.current_team().is_none());
    }

    #[test]
    fn reload_restores_teams_and_selects_first() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = TeamStore::open(storage.clone());
        let first = store.create_team("First").unwrap();
        store.create_team("Second").unwrap();
        store.add_pokemon_to_team(first.id(), &pikachu());

        let reloaded = TeamStore::open(storage);

        assert_eq!(reloaded.teams(), store.teams());
        assert_eq!(reloaded.current_team_id(), Some(first.id()));
    }

    #[test]
    fn reload_never_reuses_ids() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = TeamStore::open(storage.clone());
        let existing = store.create_team("First").unwrap();

        let mut reloaded = TeamStore::open(storage);
        let fresh = reloaded.create_team("Second").unwrap();

        let existing_id: i64 = existing.id().as_str().parse().unwrap();
        let fresh_id: i64 = fresh.id().as_str().parse().unwrap();
        assert!(fresh_id > existing_id);
    }

    #[test]
    fn malformed_blob_is_discarded() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(STORAGE_KEY, "{not json").unwrap();

        let store = TeamStore::open(storage.clone());

        assert!(store.teams().is_empty());
        assert!(storage.get(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn wrong_shape_is_discarded() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set(STORAGE_KEY, r#"{"teams": []}"#)
            .unwrap();

        let store = TeamStore::open(storage.clone());

        assert!(store.teams().is_empty());
        assert!(storage.get(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn oversized_roster_is_discarded() {
        let entries: Vec<String> = (1..=7)
            .map(|id| {
                format!(
                    r#"{{"id":{},"name":"p","types":[],"base_experience":1,"sprite":""}}"#,
                    id
                )
            })
            .collect();
        let blob = format!(
            r#"[{{"id":"1","name":"Big","pokemon":[{}],"createdAt":"2024-01-01T00:00:00.000Z"}}]"#,
            entries.join(",")
        );
        let storage = Arc::new(MemoryStore::new());
        storage.set(STORAGE_KEY, &blob).unwrap();

        let store = TeamStore::open(storage.clone());

        assert!(store.teams().is_empty());
        assert!(storage.get(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn duplicate_team_ids_are_corrupt() {
        let blob = r#"[
            {"id":"1","name":"A","pokemon":[],"createdAt":"2024-01-01T00:00:00.000Z"},
            {"id":"1","name":"B","pokemon":[],"createdAt":"2024-01-01T00:00:00.000Z"}
        ]"#;

        assert!(matches!(
            decode_collection(blob),
            Err(TeamError::CorruptState(_))
        ));
    }

    #[test]
    fn empty_array_loads_without_current() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(STORAGE_KEY, "[]").unwrap();

        let store = TeamStore::open(storage);

        assert!(store.teams().is_empty());
        assert!(store.current_team().is_none());
    }

    #[test]
    fn aces_scenario_stats() {
        let (mut store, _) = store();
        let team = store.create_team("Aces").unwrap();
        store.add_pokemon_to_team(team.id(), &pikachu());
        store.add_pokemon_to_team(team.id(), &charizard());

        let stats = store.get_team_stats(store.team(team.id()).unwrap());

        assert_eq!(stats.total_types, 3);
        assert_eq!(stats.average_base_experience, 190);
        assert_eq!(stats.types_covered, vec!["electric", "fire", "flying"]);

        store.add_pokemon_to_team(team.id(), &pikachu());
        assert_eq!(store.team(team.id()).unwrap().pokemon().len(), 2);
    }

    #[test]
    fn mutations_are_broadcast() {
        let (mut store, _) = store();
        let mut events = store.subscribe();

        let team = store.create_team("Aces").unwrap();
        store.add_pokemon_to_team(team.id(), &pikachu());
        store.add_pokemon_to_team(team.id(), &pikachu());
        store.remove_pokemon_from_team(team.id(), 25);
        store.delete_team(team.id());

        let received: Vec<TeamEvent> = std::iter::from_fn(|| events.try_recv().ok()).collect();
        assert_eq!(
            received,
            vec![
                TeamEvent::Created {
                    team_id: team.id().clone(),
                    name: "Aces".to_string(),
                },
                TeamEvent::CurrentChanged {
                    team_id: Some(team.id().clone()),
                },
                TeamEvent::PokemonAdded {
                    team_id: team.id().clone(),
                    pokemon_id: 25,
                },
                TeamEvent::PokemonRemoved {
                    team_id: team.id().clone(),
                    pokemon_id: 25,
                },
                TeamEvent::Deleted {
                    team_id: team.id().clone(),
                },
                TeamEvent::CurrentChanged { team_id: None },
            ]
        );
    }
}
