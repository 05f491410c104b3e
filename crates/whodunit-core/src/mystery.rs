//! Generated mystery content shapes shared between the provider wire format
//! and session persistence.
//!
//! Field names follow the provider's JSON contract (camelCase); array order is
//! significant everywhere, and the index of a physical clue is the join key
//! used by its unlock code.

use serde::{Deserialize, Serialize};

/// The murder victim. Never one of the participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Victim {
    pub name: String,
    pub role: String,
    pub cause_of_death: String,
    pub time_of_death: String,
    pub location: String,
    pub backstory: String,
}

/// When a physical clue should be discoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClueTiming {
    #[serde(rename = "pre-dinner")]
    PreDinner,
    #[serde(rename = "post-murder")]
    PostMurder,
}

/// Kind of content hidden behind an unlock code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlockedContentKind {
    Clue,
    Message,
    Reveal,
}

/// Digital content revealed when a physical clue's PIN is redeemed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedContent {
    #[serde(rename = "type")]
    pub kind: UnlockedContentKind,
    pub content: String,
    pub broadcast_to_all: bool,
}

/// A physical clue the host places in the venue before play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalClue {
    pub description: String,
    pub setup_instruction: String,
    pub content: String,
    pub timing: ClueTiming,
    /// Character role names this clue relates to.
    pub related_to: Vec<String>,
    pub has_unlock_code: bool,
    /// 4-digit PIN printed on the physical clue, when `has_unlock_code`.
    pub unlock_code: Option<String>,
    pub unlocked_content: Option<UnlockedContent>,
}

/// Overall difficulty of the generated mystery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// The canonical deduction path through the mystery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSolution {
    pub steps: Vec<String>,
    pub estimated_time: String,
    pub critical_clues: Vec<String>,
}

/// An alternative way to reach the solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativePath {
    pub description: String,
    pub clues: Vec<String>,
    pub estimated_time: String,
}

/// What happened, when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub murder_time: String,
    pub body_discovery: String,
    pub event_sequence: Vec<String>,
}

/// A misleading element that does not break the logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedHerring {
    pub element: String,
    pub purpose: String,
}

/// Solvability metadata proving the mystery can be deduced fairly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionMetadata {
    pub complete_solution: CompleteSolution,
    pub alternative_paths: Vec<AlternativePath>,
    pub timeline: Timeline,
    pub difficulty_rating: Difficulty,
    pub red_herrings: Vec<RedHerring>,
}
