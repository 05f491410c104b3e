//! Host-authored phase announcements.
//!
//! These carry no special event type: they are ordinary broadcast narrative
//! events with fixed copy.

/// The three scripted moments of an evening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseAnnouncement {
    /// Opening: seats taken, opening actions encouraged.
    DinnerService,
    /// The body is found; investigation begins.
    MurderReveal { victim_name: String },
    /// Everyone gathers to present evidence and accuse.
    AccusationCall,
}

impl PhaseAnnouncement {
    /// The broadcast copy for this phase.
    #[must_use]
    pub fn content(&self) -> String {
        match self {
            Self::DinnerService => "🍽️ DINNER IS SERVED! Please take your seats. Remember to \
                                    stay in character and complete your opening actions."
                .to_owned(),
            Self::MurderReveal { victim_name } => format!(
                "💀 A MURDER HAS OCCURRED! {victim_name} has been found dead! \
                 Everyone freeze and check your devices for clues."
            ),
            Self::AccusationCall => "⚖️ THE TIME HAS COME! Gather round to present your \
                                     evidence and accuse the killer."
                .to_owned(),
        }
    }
}
