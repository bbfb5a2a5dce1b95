use serde::{Deserialize, Serialize};

use crate::domain::team::Team;

/// Aggregate statistics derived from a team's roster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    /// Number of distinct types across the roster
    pub total_types: usize,
    /// Mean base experience, rounded half up
    pub average_base_experience: u32,
    /// Distinct types in first-seen order
    pub types_covered: Vec<String>,
}

/// Computes type coverage and average base experience for a team
///
/// An empty roster yields all-zero stats.
pub fn compute_stats(team: &Team) -> TeamStats {
    let roster = team.pokemon();
    if roster.is_empty() {
        return TeamStats::default();
    }

    let mut types_covered: Vec<String> = Vec::new();
    for type_name in roster.iter().flat_map(|p| p.types.iter()) {
        if !types_covered.contains(type_name) {
            types_covered.push(type_name.clone());
        }
    }

    let total: u64 = roster.iter().map(|p| u64::from(p.base_experience)).sum();
    let count = roster.len() as u64;
    // round half up without going through floats
    let average = (2 * total + count) / (2 * count);

    TeamStats {
        total_types: types_covered.len(),
        average_base_experience: average as u32,
        types_covered,
    }
}
