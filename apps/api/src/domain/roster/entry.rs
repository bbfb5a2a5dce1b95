use serde::{Deserialize, Serialize};

/// Compact record of a Pokémon stored on a team
///
/// Built once from a catalog detail record and never mutated afterwards.
/// Field names match the persisted JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosterEntry {
    /// Catalog identifier, unique within a roster
    pub id: u32,
    pub name: String,
    /// Type names in the order the catalog lists their slots
    pub types: Vec<String>,
    pub base_experience: u32,
    /// Image URL shown for the entry
    pub sprite: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_persisted_layout() {
        let json = r#"{
            "id": 25,
            "name": "pikachu",
            "types": ["electric"],
            "base_experience": 112,
            "sprite": "https://example.test/25.png"
        }"#;

        let entry: RosterEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.id, 25);
        assert_eq!(entry.types, vec!["electric".to_string()]);
        assert_eq!(entry.base_experience, 112);
    }

    #[test]
    fn rejects_unknown_fields() {
        let json = r#"{
            "id": 25,
            "name": "pikachu",
            "types": [],
            "base_experience": 112,
            "sprite": "",
            "level": 5
        }"#;

        assert!(serde_json::from_str::<RosterEntry>(json).is_err());
    }

    #[test]
    fn rejects_negative_base_experience() {
        let json = r#"{
            "id": 25,
            "name": "pikachu",
            "types": [],
            "base_experience": -1,
            "sprite": ""
        }"#;

        assert!(serde_json::from_str::<RosterEntry>(json).is_err());
    }
}
