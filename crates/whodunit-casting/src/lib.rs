//! Character reconciliation for generated mystery packages.
//!
//! Maps each generated character onto exactly one real participant,
//! tolerating imperfect name generation. Matching tiers, applied per
//! character in array order with first match winning:
//!
//! 1. exact `guest_name` match against a participant's display name,
//! 2. case-insensitive trimmed match,
//! 3. positional fallback (participant at the same index),
//! 4. otherwise the character is dropped with a warning; a participant is
//!    never fabricated.
//!
//! No participant ever receives two roles: the first character to claim one
//! wins and later duplicates are dropped. Incomplete characters are filtered
//! out and counted before matching, not treated as fatal.

use std::collections::HashSet;

use tracing::warn;
use uuid::Uuid;

use whodunit_content::schema::GeneratedCharacter;
use whodunit_core::model::{Participant, Role};

/// Outcome of reconciling one generated cast against a roster.
#[derive(Debug)]
pub struct Reconciliation {
    /// Successfully assigned roles, at most one per participant.
    pub roles: Vec<Role>,
    /// Human-readable warnings for the host review screen.
    pub warnings: Vec<String>,
    /// Characters discarded for missing required fields.
    pub dropped_incomplete: usize,
    /// Characters discarded because no participant remained assignable.
    pub dropped_unmatched: usize,
}

impl Reconciliation {
    /// Whether every participant ended up with a role. A shortfall is
    /// reported, not fatal: the session is still saved in a reviewable state
    /// so the host can patch gaps by hand.
    #[must_use]
    pub fn is_complete(&self, roster_size: usize) -> bool {
        self.roles.len() == roster_size
    }
}

/// Reconciles generated characters onto the roster.
#[must_use]
pub fn reconcile(characters: &[GeneratedCharacter], roster: &[Participant]) -> Reconciliation {
    let mut warnings = Vec::new();
    let mut dropped_incomplete = 0usize;
    let mut dropped_unmatched = 0usize;

    let complete: Vec<&GeneratedCharacter> = characters
        .iter()
        .filter(|character| {
            if character.is_complete() {
                true
            } else {
                dropped_incomplete += 1;
                warn!(
                    role_name = %character.role_name,
                    guest_name = %character.guest_name,
                    "filtering out incomplete character"
                );
                false
            }
        })
        .collect();

    let mut claimed: HashSet<Uuid> = HashSet::new();
    let mut roles = Vec::with_capacity(roster.len());

    for (index, character) in complete.iter().enumerate() {
        let Some(participant) = resolve(character, roster, index) else {
            dropped_unmatched += 1;
            warnings.push(format!(
                "No participant left for character \"{}\" (guest \"{}\"); dropped",
                character.role_name, character.guest_name
            ));
            continue;
        };

        if !claimed.insert(participant.id) {
            dropped_unmatched += 1;
            warnings.push(format!(
                "Participant \"{}\" already has a role; dropped duplicate character \"{}\"",
                participant.name, character.role_name
            ));
            continue;
        }

        roles.push(to_role(character, participant.id));
    }

    if roles.len() != roster.len() {
        warnings.push(format!(
            "Reconciled {} roles for {} participants",
            roles.len(),
            roster.len()
        ));
    }

    Reconciliation {
        roles,
        warnings,
        dropped_incomplete,
        dropped_unmatched,
    }
}

fn resolve<'a>(
    character: &GeneratedCharacter,
    roster: &'a [Participant],
    index: usize,
) -> Option<&'a Participant> {
    if let Some(participant) = roster.iter().find(|p| p.name == character.guest_name) {
        return Some(participant);
    }

    let wanted = character.guest_name.trim().to_lowercase();
    if let Some(participant) = roster
        .iter()
        .find(|p| p.name.trim().to_lowercase() == wanted)
    {
        return Some(participant);
    }

    // Positional fallback: trust generation order when names fail entirely.
    roster.get(index).inspect(|participant| {
        warn!(
            guest_name = %character.guest_name,
            index,
            fallback = %participant.name,
            "no name match, using positional fallback"
        );
    })
}

fn to_role(character: &GeneratedCharacter, participant_id: Uuid) -> Role {
    Role {
        id: Uuid::new_v4(),
        participant_id,
        name: character.role_name.clone(),
        description: character.role_description.clone(),
        backstory: character.backstory.clone(),
        secret_objective: character.objective.clone(),
        is_murderer: character.is_murderer,
        relationships: character.relationships.clone(),
        quirks: character.quirks.clone(),
        opening_action: Some(character.opening_action.clone()),
        portrait_url: None,
    }
}
