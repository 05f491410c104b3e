//! Domain records: sessions, participants, roles, narrative events, and the
//! unlock-code mechanism.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::mystery::{PhysicalClue, SolutionMetadata, UnlockedContent, Victim};

/// Marker appended to player-facing secret-objective copy for the murderer.
/// The stored model keeps `is_murderer` structured; this is rendering only.
pub const MURDERER_MARKER: &str = " YOU ARE THE MURDERER.";

/// Session lifecycle. Transitions are host-initiated and last-write-wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Planning,
    Reviewing,
    Active,
    Completed,
}

impl SessionStatus {
    /// Stable string form used in persistence and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Reviewing => "reviewing",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// One hosted game instance ("party" in user-facing copy).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub name: String,
    pub status: SessionStatus,
    pub host_pin: String,
    pub theme: String,
    pub venue_description: String,
    pub available_props: Option<String>,
    pub target_duration: String,
    pub complexity: String,
    pub min_solution_paths: i32,
    /// Opaque venue-analysis context fed back into generation when present.
    pub venue_analysis: Option<serde_json::Value>,
    pub intro: Option<String>,
    pub victim: Option<Victim>,
    pub physical_clues: Vec<PhysicalClue>,
    pub solution_metadata: Option<SolutionMetadata>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session in the planning state with the original defaults.
    #[must_use]
    pub fn new(id: Uuid, name: String, host_pin: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            status: SessionStatus::Planning,
            host_pin,
            theme: "A classic murder mystery".to_owned(),
            venue_description: "A typical room".to_owned(),
            available_props: None,
            target_duration: "60-90 minutes".to_owned(),
            complexity: "balanced".to_owned(),
            min_solution_paths: 2,
            venue_analysis: None,
            intro: None,
            victim: None,
            physical_clues: Vec::new(),
            solution_metadata: None,
            created_at,
        }
    }
}

/// One real person who joined a session ("guest").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub session_id: Uuid,
    pub name: String,
    pub personality_notes: Option<String>,
    /// 4-digit access PIN, host-assigned or generated.
    pub access_pin: String,
}

/// A relationship between two generated characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Role name of the other character.
    pub character: String,
    pub relationship: String,
}

/// A generated character assigned to a participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub name: String,
    pub description: String,
    pub backstory: String,
    pub secret_objective: String,
    pub is_murderer: bool,
    pub relationships: Vec<Relationship>,
    pub quirks: Vec<String>,
    pub opening_action: Option<String>,
    pub portrait_url: Option<String>,
}

impl Role {
    /// Player-facing secret-objective copy. The murderer marker is appended
    /// here and only here; the stored field stays free of it.
    #[must_use]
    pub fn secret_objective_copy(&self) -> String {
        if self.is_murderer {
            format!("{}{MURDERER_MARKER}", self.secret_objective)
        } else {
            self.secret_objective.clone()
        }
    }
}

/// Who receives a narrative event.
///
/// Modeled as a tagged variant rather than a nullable list so that the
/// "empty explicit set is invalid" rule cannot be represented at rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Vec<Uuid>>", into = "Option<Vec<Uuid>>")]
pub enum Audience {
    /// Every current participant of the session, evaluated live.
    Broadcast,
    /// Only the listed participant identifiers.
    Targeted(Vec<Uuid>),
}

impl Audience {
    /// Builds an explicit target set, rejecting the ambiguous empty list.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyTargetSet`] when `targets` is empty.
    pub fn targeted(targets: Vec<Uuid>) -> Result<Self, DomainError> {
        if targets.is_empty() {
            return Err(DomainError::EmptyTargetSet);
        }
        Ok(Self::Targeted(targets))
    }

    /// Whether the given participant is a recipient.
    #[must_use]
    pub fn includes(&self, participant_id: Uuid) -> bool {
        match self {
            Self::Broadcast => true,
            Self::Targeted(ids) => ids.contains(&participant_id),
        }
    }
}

impl From<Option<Vec<Uuid>>> for Audience {
    fn from(targets: Option<Vec<Uuid>>) -> Self {
        match targets {
            Some(ids) if !ids.is_empty() => Self::Targeted(ids),
            // A null list on the wire means broadcast; an empty one is only
            // reachable from trusted storage and collapses to the same thing.
            _ => Self::Broadcast,
        }
    }
}

impl From<Audience> for Option<Vec<Uuid>> {
    fn from(audience: Audience) -> Self {
        match audience {
            Audience::Broadcast => None,
            Audience::Targeted(ids) => Some(ids),
        }
    }
}

/// One piece of content pushed during play ("clue"/"game event").
///
/// The stream is append-only, ordered by creation time. `trigger_time` of
/// `None` means the event has not been released yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeEvent {
    pub id: Uuid,
    pub session_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub trigger_time: Option<DateTime<Utc>>,
    #[serde(rename = "target_participant_ids")]
    pub audience: Audience,
}

impl NarrativeEvent {
    /// Pure recipiency check: broadcast reaches everyone, a target set only
    /// its members. Broadcast is evaluated live, not snapshotted, so a
    /// participant added after creation is still a recipient.
    #[must_use]
    pub fn is_recipient(&self, participant_id: Uuid) -> bool {
        self.audience.includes(participant_id)
    }
}

/// A 4-digit code bound to one physical clue.
///
/// `clue_index` is the position within the session's physical-clue list.
/// Codes are created at generation time and cleared and re-created wholesale
/// when the mystery is regenerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockCode {
    pub id: Uuid,
    pub session_id: Uuid,
    pub clue_index: i32,
    pub code: String,
    pub unlocked_content: UnlockedContent,
    pub broadcast_to_all: bool,
}

/// Records that a participant has redeemed an unlock code.
///
/// At most one record exists per (code, participant) pair; the storage layer
/// enforces the uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockRecord {
    pub unlock_code_id: Uuid,
    pub participant_id: Uuid,
    pub unlocked_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mystery::UnlockedContentKind;

    #[test]
    fn test_secret_objective_copy_appends_marker_for_murderer() {
        let mut role = sample_role();
        role.is_murderer = true;
        assert_eq!(
            role.secret_objective_copy(),
            "Recover the ledger. YOU ARE THE MURDERER."
        );
        // Stored field stays structured.
        assert_eq!(role.secret_objective, "Recover the ledger.");
    }

    #[test]
    fn test_secret_objective_copy_unchanged_for_innocent() {
        let role = sample_role();
        assert_eq!(role.secret_objective_copy(), "Recover the ledger.");
    }

    #[test]
    fn test_audience_rejects_empty_explicit_set() {
        let err = Audience::targeted(Vec::new()).unwrap_err();
        assert!(matches!(err, DomainError::EmptyTargetSet));
    }

    #[test]
    fn test_audience_serializes_as_nullable_list() {
        let broadcast = serde_json::to_value(Audience::Broadcast).unwrap();
        assert!(broadcast.is_null());

        let id = Uuid::new_v4();
        let targeted = serde_json::to_value(Audience::targeted(vec![id]).unwrap()).unwrap();
        assert_eq!(targeted, serde_json::json!([id]));

        let parsed: Audience = serde_json::from_value(serde_json::Value::Null).unwrap();
        assert_eq!(parsed, Audience::Broadcast);
    }

    #[test]
    fn test_is_recipient_truth_table() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();

        let mut event = sample_event(Audience::Broadcast);
        assert!(event.is_recipient(p1));
        assert!(event.is_recipient(p2));

        event.audience = Audience::targeted(vec![p1]).unwrap();
        assert!(event.is_recipient(p1));
        assert!(!event.is_recipient(p2));
    }

    fn sample_role() -> Role {
        Role {
            id: Uuid::new_v4(),
            participant_id: Uuid::new_v4(),
            name: "Lady Ashcombe".to_owned(),
            description: "The estranged heiress".to_owned(),
            backstory: "Raised abroad, returned for the will reading.".to_owned(),
            secret_objective: "Recover the ledger.".to_owned(),
            is_murderer: false,
            relationships: Vec::new(),
            quirks: Vec::new(),
            opening_action: None,
            portrait_url: None,
        }
    }

    fn sample_event(audience: Audience) -> NarrativeEvent {
        NarrativeEvent {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            content: "A scream from the library.".to_owned(),
            created_at: Utc::now(),
            trigger_time: None,
            audience,
        }
    }

    #[test]
    fn test_session_defaults_match_planning_state() {
        let session = Session::new(
            Uuid::new_v4(),
            "Gatsby Night".to_owned(),
            "4242".to_owned(),
            Utc::now(),
        );
        assert_eq!(session.status, SessionStatus::Planning);
        assert_eq!(session.theme, "A classic murder mystery");
        assert_eq!(session.min_solution_paths, 2);
        assert!(session.victim.is_none());
        assert!(session.physical_clues.is_empty());
    }

    #[test]
    fn test_unlocked_content_kind_available_in_models() {
        // Compile-time wiring check for the re-exported mystery shapes.
        let content = UnlockedContent {
            kind: UnlockedContentKind::Message,
            content: "Meet me at midnight.".to_owned(),
            broadcast_to_all: false,
        };
        assert!(!content.broadcast_to_all);
    }
}
