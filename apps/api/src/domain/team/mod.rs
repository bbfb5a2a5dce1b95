// Team domain module
// Contains the team aggregate, its value objects, domain events and the store

#![allow(clippy::module_inception)]

pub mod errors;
pub mod events;
pub mod store;
pub mod team;
pub mod value_objects;

// Re-export main types for convenience
pub use errors::{RosterError, TeamError};
pub use events::TeamEvent;
pub use store::{AddOutcome, TeamStore, STORAGE_KEY};
pub use team::Team;
pub use value_objects::{TeamId, TeamIdGenerator};
