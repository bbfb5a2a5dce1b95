use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque team identifier
///
/// Generated ids are decimal millisecond timestamps, but ids loaded from
/// storage are accepted as any string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        TeamId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TeamId {
    fn from(id: String) -> Self {
        TeamId(id)
    }
}

impl From<&str> for TeamId {
    fn from(id: &str) -> Self {
        TeamId(id.to_string())
    }
}

/// Largest id treated as a timestamp: 9999-12-31T23:59:59.999Z
const MAX_TIMESTAMP_MILLIS: i64 = 253_402_300_799_999;

/// Issues timestamp-derived team ids that never repeat
///
/// Two teams created in the same millisecond get consecutive values, and
/// numeric ids seen in storage push the floor up so reloads never collide.
///
/// # Example
/// ```
/// use chrono::Utc;
/// use pokedex_teams_api::domain::team::TeamIdGenerator;
///
/// let mut ids = TeamIdGenerator::new();
/// let now = Utc::now();
/// let first = ids.next_at(now);
/// let second = ids.next_at(now);
/// assert_ne!(first, second);
/// ```
#[derive(Debug, Default)]
pub struct TeamIdGenerator {
    last: i64,
}

impl TeamIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the floor past an existing id if it reads as a timestamp
    ///
    /// Other ids, numeric or not, cannot collide with generated ones and
    /// are ignored.
    pub fn observe(&mut self, id: &TeamId) {
        match id.as_str().parse::<i64>() {
            Ok(value) if (0..=MAX_TIMESTAMP_MILLIS).contains(&value) => {
                self.last = self.last.max(value);
            }
            _ => {}
        }
    }

    /// Returns a fresh id for a team created at `now`
    pub fn next_at(&mut self, now: DateTime<Utc>) -> TeamId {
        let millis = now.timestamp_millis().max(self.last.saturating_add(1));
        self.last = millis;
        TeamId(millis.to_string())
    }
}
