//! The structural contract a generated mystery package must satisfy.
//!
//! Everything here is validated, not trusted: the caller must not assume
//! `characters.len()` matches the roster, that guest names match exactly, or
//! that exactly one character is the murderer. Those checks happen in
//! `whodunit-casting` and `whodunit-analysis`.

use serde::{Deserialize, Serialize};

use whodunit_core::model::Relationship;
use whodunit_core::mystery::{PhysicalClue, SolutionMetadata, Victim};

/// A candidate character for one guest, as generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCharacter {
    /// Real guest name the provider believes this role belongs to.
    pub guest_name: String,
    /// Character name.
    pub role_name: String,
    /// Public description.
    pub role_description: String,
    pub backstory: String,
    /// A specific secret they hide.
    pub secret: String,
    /// A goal forcing interaction.
    pub objective: String,
    pub is_murderer: bool,
    pub relationships: Vec<Relationship>,
    /// Behavioral quirks and props.
    pub quirks: Vec<String>,
    /// A specific dramatic action to perform at the start.
    pub opening_action: String,
}

impl GeneratedCharacter {
    /// Whether every required field carries content. Partial entries are
    /// silently discarded (and counted) during reconciliation rather than
    /// failing generation.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.guest_name.trim().is_empty()
            && !self.role_name.trim().is_empty()
            && !self.role_description.trim().is_empty()
            && !self.backstory.trim().is_empty()
            && !self.secret.trim().is_empty()
            && !self.objective.trim().is_empty()
            && !self.opening_action.trim().is_empty()
    }
}

/// An in-app clue to be pushed during play.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedClue {
    pub content: String,
    pub suggested_timing: String,
    /// Character role names this clue should reach; empty means everyone.
    pub target_roles: Vec<String>,
}

/// A complete generated mystery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MysteryPackage {
    pub title: String,
    /// The opening scene description.
    pub intro: String,
    pub victim: Victim,
    pub characters: Vec<GeneratedCharacter>,
    /// Ordered; a clue's index is the join key for its unlock code.
    pub physical_clues: Vec<PhysicalClue>,
    pub clues: Vec<GeneratedClue>,
    pub solution_metadata: SolutionMetadata,
}

impl MysteryPackage {
    /// Total clue count across physical and in-app clues.
    #[must_use]
    pub fn total_clue_count(&self) -> usize {
        self.physical_clues.len() + self.clues.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_deserializes_from_provider_wire_format() {
        let json = r#"{
            "title": "Death at the Observatory",
            "intro": "The telescope dome creaks shut...",
            "victim": {
                "name": "Prof. Veld",
                "role": "Director",
                "causeOfDeath": "Blunt trauma",
                "timeOfDeath": "9:15 PM",
                "location": "Dome floor",
                "backstory": "Feared and respected."
            },
            "characters": [{
                "guestName": "Ann",
                "roleName": "Dr. Sable",
                "roleDescription": "Ambitious deputy",
                "backstory": "Passed over twice.",
                "secret": "Forged the grant figures.",
                "objective": "Find the audit letter.",
                "isMurderer": true,
                "relationships": [{"character": "Mx. Quill", "relationship": "Former mentee"}],
                "quirks": ["Checks watch constantly"],
                "openingAction": "Toast the late professor."
            }],
            "physicalClues": [{
                "description": "A cracked lens",
                "setupInstruction": "Place under the armchair",
                "content": "Initials scratched: D.S.",
                "timing": "post-murder",
                "relatedTo": ["Dr. Sable"],
                "hasUnlockCode": true,
                "unlockCode": "4417",
                "unlockedContent": {
                    "type": "clue",
                    "content": "The lens belongs to the deputy's spectacles.",
                    "broadcastToAll": false
                }
            }],
            "clues": [{
                "content": "Someone was seen near the dome at nine.",
                "suggestedTiming": "after body discovery",
                "targetRoles": ["Dr. Sable"]
            }],
            "solutionMetadata": {
                "completeSolution": {
                    "steps": ["Find lens", "Match initials"],
                    "estimatedTime": "45-60 minutes",
                    "criticalClues": ["cracked lens"]
                },
                "alternativePaths": [],
                "timeline": {
                    "murderTime": "9:15 PM",
                    "bodyDiscovery": "9:40 PM",
                    "eventSequence": ["Argument", "Murder", "Discovery"]
                },
                "difficultyRating": "medium",
                "redHerrings": []
            }
        }"#;

        let package: MysteryPackage = serde_json::from_str(json).unwrap();
        assert_eq!(package.title, "Death at the Observatory");
        assert_eq!(package.characters.len(), 1);
        assert!(package.characters[0].is_murderer);
        assert_eq!(package.physical_clues[0].unlock_code.as_deref(), Some("4417"));
        assert_eq!(package.total_clue_count(), 2);
    }

    #[test]
    fn test_incomplete_character_detected() {
        let json = r#"{
            "guestName": "Bob",
            "roleName": "",
            "roleDescription": "x",
            "backstory": "x",
            "secret": "x",
            "objective": "x",
            "isMurderer": false,
            "relationships": [],
            "quirks": [],
            "openingAction": "x"
        }"#;
        let character: GeneratedCharacter = serde_json::from_str(json).unwrap();
        assert!(!character.is_complete());
    }
}
