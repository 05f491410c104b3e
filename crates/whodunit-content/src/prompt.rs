//! Prompt construction for the content provider.

use std::fmt::Write as _;

use whodunit_core::model::{Participant, Role, Session};

/// System instructions for a full mystery generation.
pub const SYSTEM_PROMPT: &str = "\
You are an expert murder mystery game designer specializing in social \
engineering, interactive party dynamics, and logical deduction. Your goal is \
a mystery that is not just dramatic but fairly solvable through evidence.

Respond with valid JSON containing ALL of these fields: title, intro, victim, \
characters, physicalClues, clues, solutionMetadata.

Rules:
- Generate EXACTLY ONE character per guest, no duplicates, no partial objects.
- Exactly one character has isMurderer set to true. The victim is NOT a guest.
- Every character needs guestName, roleName, roleDescription, backstory, \
secret, objective, isMurderer, relationships, quirks, openingAction.
- Generate 5-8 physicalClues with setupInstruction placements that use the \
real venue, timing of \"pre-dinner\" or \"post-murder\", and relatedTo role \
names. Some clues should set hasUnlockCode with a 4-digit unlockCode and an \
unlockedContent object { type, content, broadcastToAll }.
- Generate 3-5 in-app clues with content, suggestedTiming, targetRoles.
- solutionMetadata must prove solvability: completeSolution (steps, \
estimatedTime, criticalClues), alternativePaths, timeline (murderTime, \
bodyDiscovery, eventSequence), difficultyRating (easy|medium|hard), \
redHerrings.
- Objectives must force interaction with specific people. Alibis must match \
the murder time. Clues must work in any discovery order.";

/// System instructions for an edit-instruction revision of an existing story.
pub const REVISION_SYSTEM_PROMPT: &str = "\
You are an expert murder mystery editor. Modify the existing mystery \
according to the user's instruction, keeping unchanged parts consistent, and \
return the complete updated mystery as JSON in the same shape as the \
original generation (title, intro, victim, characters, physicalClues, clues, \
solutionMetadata). Keep exactly one murderer.";

/// A fully assembled generation request.
#[derive(Debug, Clone)]
pub struct GenerationPrompt {
    pub system: String,
    pub user: String,
}

impl GenerationPrompt {
    /// Builds the prompt from the session hints, the roster, and the
    /// venue-analysis context when one has been captured.
    #[must_use]
    pub fn for_session(session: &Session, roster: &[Participant]) -> Self {
        let mut user = String::new();
        let _ = writeln!(user, "Party Name: {}", session.name);
        let _ = writeln!(user, "Story/Theme: {}", session.theme);
        let _ = writeln!(user, "Physical Venue: {}", session.venue_description);
        if let Some(props) = &session.available_props {
            let _ = writeln!(user, "Available Props: {props}");
        }
        if let Some(analysis) = &session.venue_analysis {
            let _ = writeln!(
                user,
                "\nVENUE ANALYSIS (use these objects for hiding spots, do not \
                 invent furniture not listed here):\n{analysis}"
            );
        }
        let _ = writeln!(user, "\nPLANNING CONSTRAINTS:");
        let _ = writeln!(user, "- Target Duration: {}", session.target_duration);
        let _ = writeln!(user, "- Complexity Level: {}", session.complexity);
        let _ = writeln!(
            user,
            "- Minimum Solution Paths: {} (ensure at least this many valid \
             ways to deduce the killer)",
            session.min_solution_paths
        );
        let _ = writeln!(user, "\nGuests ({}):", roster.len());
        for participant in roster {
            match &participant.personality_notes {
                Some(notes) if !notes.trim().is_empty() => {
                    let _ = writeln!(user, "- {} ({notes})", participant.name);
                }
                _ => {
                    let _ = writeln!(user, "- {}", participant.name);
                }
            }
        }
        let _ = writeln!(
            user,
            "\nGenerate a complete murder mystery with a victim, character \
             roles for ALL {} guests, physical clue setup instructions, \
             in-app clues, and a solution that respects the constraints.",
            roster.len()
        );

        Self {
            system: SYSTEM_PROMPT.to_owned(),
            user,
        }
    }
}

/// A revision request carrying the host's edit instruction plus the current
/// story context.
#[derive(Debug, Clone)]
pub struct RevisionPrompt {
    pub system: String,
    pub user: String,
}

impl RevisionPrompt {
    /// Builds the prompt from the current story state and an instruction.
    #[must_use]
    pub fn for_session(
        session: &Session,
        roster: &[Participant],
        roles: &[Role],
        instruction: &str,
    ) -> Self {
        let mut user = String::new();
        let _ = writeln!(user, "USER INSTRUCTION: \"{instruction}\"");
        let _ = writeln!(user, "\nCurrent Story:");
        let _ = writeln!(user, "Title: {}", session.name);
        let _ = writeln!(user, "Theme: {}", session.theme);
        if let Some(victim) = &session.victim {
            let victim_json =
                serde_json::to_string(victim).unwrap_or_else(|_| victim.name.clone());
            let _ = writeln!(user, "Victim: {victim_json}");
        }
        let _ = writeln!(user, "Cast:");
        for role in roles {
            let _ = writeln!(user, "- {} ({})", role.name, role.description);
        }
        let _ = writeln!(user, "\nGuests ({}):", roster.len());
        for participant in roster {
            let _ = writeln!(user, "- {}", participant.name);
        }
        let _ = writeln!(
            user,
            "\nRewrite the necessary parts of the victim, characters, and \
             clues to satisfy the instruction. Keep character roles mapped to \
             the same guest names."
        );

        Self {
            system: REVISION_SYSTEM_PROMPT.to_owned(),
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn session() -> Session {
        let mut session = Session::new(
            Uuid::new_v4(),
            "Gatsby Night".to_owned(),
            "1234".to_owned(),
            Utc::now(),
        );
        session.theme = "1920s Gatsby".to_owned();
        session.venue_description = "A loft with a long dinner table".to_owned();
        session
    }

    fn participant(name: &str, notes: Option<&str>) -> Participant {
        Participant {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            name: name.to_owned(),
            personality_notes: notes.map(ToOwned::to_owned),
            access_pin: "1000".to_owned(),
        }
    }

    #[test]
    fn test_generation_prompt_lists_every_guest_with_notes() {
        let roster = vec![
            participant("Ann", Some("loves theatrics")),
            participant("Bob", None),
        ];
        let prompt = GenerationPrompt::for_session(&session(), &roster);

        assert!(prompt.user.contains("Story/Theme: 1920s Gatsby"));
        assert!(prompt.user.contains("Guests (2):"));
        assert!(prompt.user.contains("- Ann (loves theatrics)"));
        assert!(prompt.user.contains("- Bob\n"));
        assert!(prompt.user.contains("ALL 2 guests"));
    }

    #[test]
    fn test_generation_prompt_includes_venue_analysis_when_present() {
        let mut session = session();
        session.venue_analysis = Some(serde_json::json!({"roomType": "loft"}));
        let prompt = GenerationPrompt::for_session(&session, &[participant("Ann", None)]);
        assert!(prompt.user.contains("VENUE ANALYSIS"));
        assert!(prompt.user.contains("loft"));
    }

    #[test]
    fn test_revision_prompt_carries_the_instruction() {
        let prompt = RevisionPrompt::for_session(
            &session(),
            &[participant("Ann", None)],
            &[],
            "make the butler less suspicious",
        );
        assert!(prompt.user.contains("make the butler less suspicious"));
        assert_eq!(prompt.system, REVISION_SYSTEM_PROMPT);
    }
}
