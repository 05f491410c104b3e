//! Canonical fixtures used across crate tests.

use chrono::Utc;
use uuid::Uuid;

use whodunit_content::schema::{GeneratedCharacter, GeneratedClue, MysteryPackage};
use whodunit_core::model::{Participant, Session};
use whodunit_core::mystery::{
    ClueTiming, CompleteSolution, Difficulty, PhysicalClue, SolutionMetadata, Timeline,
    UnlockedContent, UnlockedContentKind, Victim,
};

/// A session in planning state with a themed setup.
#[must_use]
pub fn sample_session() -> Session {
    let mut session = Session::new(
        Uuid::new_v4(),
        "Midnight at the Manor".to_owned(),
        "9911".to_owned(),
        Utc::now(),
    );
    session.theme = "1920s country manor".to_owned();
    session.venue_description = "A living room with a fireplace and bookshelf".to_owned();
    session
}

/// A participant in the given session.
#[must_use]
pub fn sample_participant(session_id: Uuid, name: &str) -> Participant {
    Participant {
        id: Uuid::new_v4(),
        session_id,
        name: name.to_owned(),
        personality_notes: None,
        access_pin: "1000".to_owned(),
    }
}

fn character(guest_name: &str, role_name: &str, is_murderer: bool) -> GeneratedCharacter {
    GeneratedCharacter {
        guest_name: guest_name.to_owned(),
        role_name: role_name.to_owned(),
        role_description: format!("{role_name}, a figure of the manor"),
        backstory: "Arrived under an assumed name years ago.".to_owned(),
        secret: "Knows where the will is hidden.".to_owned(),
        objective: "Get the colonel alone before midnight.".to_owned(),
        is_murderer,
        relationships: Vec::new(),
        quirks: vec!["Taps their ring on glasses".to_owned()],
        opening_action: "Propose a toast to the host.".to_owned(),
    }
}

/// A well-formed package for the given guest names. The first guest's
/// character is the murderer; two physical clues carry unlock codes (the
/// second a broadcast one) and clue counts satisfy the solvability minimum.
#[must_use]
pub fn sample_package(guest_names: &[&str]) -> MysteryPackage {
    let characters = guest_names
        .iter()
        .enumerate()
        .map(|(i, name)| character(name, &format!("Suspect {i}"), i == 0))
        .collect();

    let physical_clues = vec![
        PhysicalClue {
            description: "A monogrammed handkerchief".to_owned(),
            setup_instruction: "Tuck behind the fireplace tools".to_owned(),
            content: "Initials: S.0".to_owned(),
            timing: ClueTiming::PreDinner,
            related_to: vec!["Suspect 0".to_owned()],
            has_unlock_code: true,
            unlock_code: Some("4417".to_owned()),
            unlocked_content: Some(UnlockedContent {
                kind: UnlockedContentKind::Clue,
                content: "The handkerchief was bought last week.".to_owned(),
                broadcast_to_all: false,
            }),
        },
        PhysicalClue {
            description: "A torn telegram".to_owned(),
            setup_instruction: "Inside the bookshelf, middle shelf".to_owned(),
            content: "\"...arriving tonight. Tell no one.\"".to_owned(),
            timing: ClueTiming::PostMurder,
            related_to: Vec::new(),
            has_unlock_code: true,
            unlock_code: Some("8052".to_owned()),
            unlocked_content: Some(UnlockedContent {
                kind: UnlockedContentKind::Reveal,
                content: "The telegram was sent from the manor itself.".to_owned(),
                broadcast_to_all: true,
            }),
        },
        PhysicalClue {
            description: "A muddy boot print".to_owned(),
            setup_instruction: "Paper cutout by the terrace door".to_owned(),
            content: "Size eleven, fresh mud".to_owned(),
            timing: ClueTiming::PostMurder,
            related_to: Vec::new(),
            has_unlock_code: false,
            unlock_code: None,
            unlocked_content: None,
        },
    ];

    let clues = vec![
        GeneratedClue {
            content: "The colonel was overheard arguing at nine.".to_owned(),
            suggested_timing: "after body discovery".to_owned(),
            target_roles: vec!["Suspect 0".to_owned()],
        },
        GeneratedClue {
            content: "The terrace door was found unlatched.".to_owned(),
            suggested_timing: "mid-investigation".to_owned(),
            target_roles: Vec::new(),
        },
    ];

    MysteryPackage {
        title: "Midnight at the Manor".to_owned(),
        intro: "Rain lashes the windows as the guests arrive...".to_owned(),
        victim: Victim {
            name: "Colonel Hargrove".to_owned(),
            role: "Master of the house".to_owned(),
            cause_of_death: "Poisoned brandy".to_owned(),
            time_of_death: "9:30 PM".to_owned(),
            location: "The study".to_owned(),
            backstory: "Made his fortune abroad, and enemies with it.".to_owned(),
        },
        characters,
        physical_clues,
        clues,
        solution_metadata: SolutionMetadata {
            complete_solution: CompleteSolution {
                steps: vec![
                    "Find the handkerchief".to_owned(),
                    "Match the initials".to_owned(),
                    "Break the telegram alibi".to_owned(),
                ],
                estimated_time: "60 minutes".to_owned(),
                critical_clues: vec!["monogrammed handkerchief".to_owned()],
            },
            alternative_paths: Vec::new(),
            timeline: Timeline {
                murder_time: "9:30 PM".to_owned(),
                body_discovery: "9:50 PM".to_owned(),
                event_sequence: vec![
                    "Dinner served".to_owned(),
                    "Colonel retires to the study".to_owned(),
                    "Body discovered".to_owned(),
                ],
            },
            difficulty_rating: Difficulty::Medium,
            red_herrings: Vec::new(),
        },
    }
}
