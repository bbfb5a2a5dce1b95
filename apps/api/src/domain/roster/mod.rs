// Roster policy
// Pure rules deciding who may join a team and what a team looks like in aggregate

pub mod entry;
pub mod policy;
pub mod stats;

pub use entry::RosterEntry;
pub use policy::{availability, can_add, to_roster_entry, Availability, MAX_TEAM_SIZE};
pub use stats::{compute_stats, TeamStats};
