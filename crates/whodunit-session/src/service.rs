//! The session orchestrator.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use whodunit_analysis::{
    DurationEstimate, DurationInput, SolvabilityInput, ValidationReport, estimate,
    estimate_package, validate, validate_package,
};
use whodunit_casting::reconcile;
use whodunit_content::prompt::{GenerationPrompt, RevisionPrompt};
use whodunit_content::provider::MysteryProvider;
use whodunit_content::schema::{GeneratedClue, MysteryPackage};
use whodunit_core::clock::Clock;
use whodunit_core::error::DomainError;
use whodunit_core::model::{
    Audience, NarrativeEvent, Participant, Role, Session, SessionStatus,
};
use whodunit_core::mystery::PhysicalClue;
use whodunit_core::rng::{DeterministicRng, four_digit_pin};
use whodunit_core::store::{ParticipantStore, RoleStore, SessionStore, UnlockStore};
use whodunit_events::{EventDistributor, PhaseAnnouncement};
use whodunit_unlock::{ClueUnlock, Redemption, codes_for_clues};

/// What a generation run produced, for the host review screen.
///
/// A failed validation or a reconciliation shortfall never blocks saving:
/// the session lands in `Reviewing` either way and the host decides.
#[derive(Debug, Serialize)]
pub struct GenerationOutcome {
    pub validation: ValidationReport,
    pub estimate: DurationEstimate,
    pub warnings: Vec<String>,
    pub roles_assigned: usize,
}

/// Host-editable session hints.
#[derive(Debug, Clone, Default)]
pub struct SessionDetails {
    pub theme: Option<String>,
    pub venue_description: Option<String>,
    pub available_props: Option<String>,
    pub target_duration: Option<String>,
    pub complexity: Option<String>,
    pub min_solution_paths: Option<i32>,
}

/// Collaborators of the orchestrator.
pub struct SessionDeps {
    pub sessions: Arc<dyn SessionStore>,
    pub participants: Arc<dyn ParticipantStore>,
    pub roles: Arc<dyn RoleStore>,
    pub unlocks: Arc<dyn UnlockStore>,
    pub provider: Arc<dyn MysteryProvider>,
    pub distributor: EventDistributor,
    pub unlock: ClueUnlock,
    pub clock: Arc<dyn Clock>,
    pub rng: Arc<Mutex<dyn DeterministicRng>>,
}

/// The orchestration service behind every host-facing operation.
pub struct SessionService {
    deps: SessionDeps,
}

impl SessionService {
    #[must_use]
    pub fn new(deps: SessionDeps) -> Self {
        Self { deps }
    }

    /// Creates a session in the planning state with the stock defaults.
    pub async fn create_session(
        &self,
        name: String,
        host_pin: String,
    ) -> Result<Session, DomainError> {
        if name.trim().is_empty() || host_pin.trim().is_empty() {
            return Err(DomainError::Validation(
                "name and host PIN are required".into(),
            ));
        }
        let session = Session::new(Uuid::new_v4(), name, host_pin, self.deps.clock.now());
        self.deps.sessions.insert(&session).await?;
        info!(session_id = %session.id, "session created");
        Ok(session)
    }

    pub async fn get_session(&self, session_id: Uuid) -> Result<Session, DomainError> {
        self.deps.sessions.get(session_id).await
    }

    /// Applies host edits to the planning hints.
    pub async fn update_session_details(
        &self,
        session_id: Uuid,
        details: SessionDetails,
    ) -> Result<Session, DomainError> {
        let mut session = self.deps.sessions.get(session_id).await?;
        if let Some(theme) = details.theme {
            session.theme = theme;
        }
        if let Some(venue) = details.venue_description {
            session.venue_description = venue;
        }
        if let Some(props) = details.available_props {
            session.available_props = Some(props);
        }
        if let Some(duration) = details.target_duration {
            session.target_duration = duration;
        }
        if let Some(complexity) = details.complexity {
            session.complexity = complexity;
        }
        if let Some(paths) = details.min_solution_paths {
            session.min_solution_paths = paths;
        }
        self.deps.sessions.update(&session).await?;
        Ok(session)
    }

    /// Lifecycle transition. Single-writer, last-write-wins: both a
    /// regeneration and a host "start game" go through the same row update,
    /// which is acceptable since both are host-initiated.
    pub async fn set_status(
        &self,
        session_id: Uuid,
        status: SessionStatus,
    ) -> Result<Session, DomainError> {
        let mut session = self.deps.sessions.get(session_id).await?;
        info!(
            %session_id,
            from = session.status.as_str(),
            to = status.as_str(),
            "session status transition"
        );
        session.status = status;
        self.deps.sessions.update(&session).await?;
        Ok(session)
    }

    /// Adds a guest. The access PIN is host-assigned or drawn from the RNG.
    pub async fn add_participant(
        &self,
        session_id: Uuid,
        name: String,
        personality_notes: Option<String>,
        access_pin: Option<String>,
    ) -> Result<Participant, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation("participant name is required".into()));
        }
        // Existence check before insert.
        self.deps.sessions.get(session_id).await?;

        let pin = match access_pin {
            Some(pin) => pin,
            None => {
                let mut rng = self
                    .deps
                    .rng
                    .lock()
                    .map_err(|_| DomainError::Infrastructure("rng mutex poisoned".into()))?;
                four_digit_pin(&mut *rng)
            }
        };

        let participant = Participant {
            id: Uuid::new_v4(),
            session_id,
            name,
            personality_notes,
            access_pin: pin,
        };
        self.deps.participants.insert(&participant).await?;
        Ok(participant)
    }

    pub async fn roster(&self, session_id: Uuid) -> Result<Vec<Participant>, DomainError> {
        self.deps.participants.list_for_session(session_id).await
    }

    pub async fn list_roles(&self, session_id: Uuid) -> Result<Vec<Role>, DomainError> {
        self.deps.roles.list_for_session(session_id).await
    }

    /// Host review edit of a single role.
    pub async fn update_role(&self, role: Role) -> Result<(), DomainError> {
        self.deps.roles.update(&role).await
    }

    /// Host review edit of one physical clue, addressed by its index.
    /// Unlock codes are not resynced by an edit; only regeneration replaces
    /// them wholesale.
    pub async fn update_physical_clue(
        &self,
        session_id: Uuid,
        index: usize,
        clue: PhysicalClue,
    ) -> Result<(), DomainError> {
        let mut session = self.deps.sessions.get(session_id).await?;
        let Some(slot) = session.physical_clues.get_mut(index) else {
            return Err(DomainError::Validation(format!(
                "no physical clue at index {index}"
            )));
        };
        *slot = clue;
        self.deps.sessions.update(&session).await
    }

    /// Runs a full generation: prompt, provider call, reconciliation,
    /// validation, estimation, persistence, and clue seeding.
    ///
    /// The provider call is the only long-latency step; nothing is locked
    /// across it and on failure the session keeps its prior status.
    pub async fn request_generation(
        &self,
        session_id: Uuid,
    ) -> Result<GenerationOutcome, DomainError> {
        let session = self.deps.sessions.get(session_id).await?;
        let roster = self.deps.participants.list_for_session(session_id).await?;
        if roster.is_empty() {
            return Err(DomainError::Validation(
                "cannot generate a mystery without participants".into(),
            ));
        }

        let prompt = GenerationPrompt::for_session(&session, &roster);
        let package = self.deps.provider.generate(prompt).await?;

        self.apply_package(session, roster, package).await
    }

    /// Re-runs generation with a host edit instruction against the current
    /// story, then persists through the same pipeline.
    pub async fn revise_generation(
        &self,
        session_id: Uuid,
        instruction: &str,
    ) -> Result<GenerationOutcome, DomainError> {
        let session = self.deps.sessions.get(session_id).await?;
        if session.victim.is_none() {
            return Err(DomainError::Validation(
                "nothing to revise: no mystery has been generated".into(),
            ));
        }
        let roster = self.deps.participants.list_for_session(session_id).await?;
        let roles = self.deps.roles.list_for_session(session_id).await?;

        let prompt = RevisionPrompt::for_session(&session, &roster, &roles, instruction);
        let package = self.deps.provider.revise(prompt).await?;

        self.apply_package(session, roster, package).await
    }

    /// Shared post-provider pipeline. The package is an immutable local
    /// copy by the time anything is written.
    async fn apply_package(
        &self,
        mut session: Session,
        roster: Vec<Participant>,
        package: MysteryPackage,
    ) -> Result<GenerationOutcome, DomainError> {
        let session_id = session.id;
        let reconciliation = reconcile(&package.characters, &roster);
        let mut warnings = reconciliation.warnings.clone();
        if !reconciliation.is_complete(roster.len()) {
            warn!(
                %session_id,
                assigned = reconciliation.roles.len(),
                roster = roster.len(),
                "reconciliation shortfall; saving for host review"
            );
        }

        let validation = validate_package(&package, &reconciliation.roles);
        if !validation.is_valid {
            warnings.extend(validation.issues.iter().cloned());
        }
        let estimate = estimate_package(&package, roster.len());

        // Status transition and generated artifacts land in one write.
        session.status = SessionStatus::Reviewing;
        session.intro = Some(package.intro.clone());
        session.victim = Some(package.victim.clone());
        session.physical_clues = package.physical_clues.clone();
        session.solution_metadata = Some(package.solution_metadata.clone());
        self.deps.sessions.update(&session).await?;

        self.deps
            .roles
            .replace_for_session(session_id, &reconciliation.roles)
            .await?;

        // Wholesale replacement: regeneration clears prior codes.
        let codes = codes_for_clues(session_id, &package.physical_clues);
        self.deps.unlocks.replace_codes(session_id, &codes).await?;

        for clue in &package.clues {
            let audience = seeded_clue_audience(clue, &reconciliation.roles);
            let content = format!("[{}] {}", clue.suggested_timing, clue.content);
            self.deps.distributor.seed(session_id, content, audience).await?;
        }

        info!(
            %session_id,
            roles = reconciliation.roles.len(),
            score = validation.score,
            unlock_codes = codes.len(),
            "generation persisted for review"
        );

        Ok(GenerationOutcome {
            validation,
            estimate,
            warnings,
            roles_assigned: reconciliation.roles.len(),
        })
    }

    /// Host clue or announcement, released immediately.
    pub async fn send_event(
        &self,
        session_id: Uuid,
        content: String,
        targets: Option<Vec<Uuid>>,
    ) -> Result<NarrativeEvent, DomainError> {
        let audience = match targets {
            None => Audience::Broadcast,
            Some(ids) => Audience::targeted(ids)?,
        };
        self.deps.distributor.send(session_id, content, audience).await
    }

    /// Scripted phase announcement, delivered as an ordinary broadcast event.
    pub async fn announce_phase(
        &self,
        session_id: Uuid,
        announcement: PhaseAnnouncement,
    ) -> Result<NarrativeEvent, DomainError> {
        self.deps
            .distributor
            .send(session_id, announcement.content(), Audience::Broadcast)
            .await
    }

    /// Event history for one viewer (`None` = host sees everything).
    pub async fn events_for(
        &self,
        session_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<Vec<NarrativeEvent>, DomainError> {
        self.deps.distributor.history_for(session_id, viewer).await
    }

    pub async fn redeem_code(
        &self,
        session_id: Uuid,
        participant_id: Uuid,
        code: &str,
    ) -> Result<Redemption, DomainError> {
        // The participant must belong to this session.
        let participant = self.deps.participants.get(participant_id).await?;
        if participant.session_id != session_id {
            return Err(DomainError::ParticipantNotFound(participant_id));
        }
        self.deps.unlock.redeem(session_id, participant_id, code).await
    }

    /// Re-runs the solvability rules over the stored session state, so the
    /// host can re-check after manual edits.
    pub async fn validate_solvability(
        &self,
        session_id: Uuid,
    ) -> Result<ValidationReport, DomainError> {
        let session = self.deps.sessions.get(session_id).await?;
        let roles = self.deps.roles.list_for_session(session_id).await?;
        let digital = self.pending_digital_clues(session_id).await?;

        let input = SolvabilityInput {
            solution: session.solution_metadata.as_ref(),
            physical_clue_count: session.physical_clues.len(),
            digital_clue_count: digital,
            murderer_count: roles.iter().filter(|role| role.is_murderer).count(),
        };
        Ok(validate(&input))
    }

    /// Re-runs the duration heuristic over the stored session state.
    pub async fn estimate_duration(
        &self,
        session_id: Uuid,
    ) -> Result<DurationEstimate, DomainError> {
        let session = self.deps.sessions.get(session_id).await?;
        let roster = self.deps.participants.list_for_session(session_id).await?;
        let digital = self.pending_digital_clues(session_id).await?;

        let input = DurationInput {
            physical_clue_count: session.physical_clues.len(),
            digital_clue_count: digital,
            difficulty: session
                .solution_metadata
                .as_ref()
                .map(|metadata| metadata.difficulty_rating),
        };
        Ok(estimate(&input, roster.len()))
    }

    /// Unreleased seeded events are the stored form of the package's in-app
    /// clue list.
    async fn pending_digital_clues(&self, session_id: Uuid) -> Result<usize, DomainError> {
        let events = self.deps.distributor.history_for(session_id, None).await?;
        Ok(events
            .iter()
            .filter(|event| event.trigger_time.is_none())
            .count())
    }
}

fn seeded_clue_audience(clue: &GeneratedClue, roles: &[Role]) -> Audience {
    if clue.target_roles.is_empty() {
        return Audience::Broadcast;
    }
    let ids: Vec<Uuid> = roles
        .iter()
        .filter(|role| clue.target_roles.contains(&role.name))
        .map(|role| role.participant_id)
        .collect();
    // Target roles that survived reconciliation; fall back to broadcast when
    // none did rather than inventing an empty target set.
    Audience::targeted(ids).unwrap_or(Audience::Broadcast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use whodunit_core::store::EventStore;
    use whodunit_test_support::{
        CannedProvider, FailingProvider, FixedClock, InMemoryEventStore,
        InMemoryParticipantStore, InMemoryRoleStore, InMemorySessionStore, InMemoryUnlockStore,
        MockRng, RecordingChannel, sample_package,
    };

    struct Harness {
        service: SessionService,
        sessions: Arc<InMemorySessionStore>,
        events: Arc<InMemoryEventStore>,
        unlocks: Arc<InMemoryUnlockStore>,
        channel: Arc<RecordingChannel>,
    }

    fn harness(provider: Arc<dyn MysteryProvider>) -> Harness {
        let sessions = Arc::new(InMemorySessionStore::default());
        let participants = Arc::new(InMemoryParticipantStore::default());
        let roles = Arc::new(InMemoryRoleStore::default());
        let unlocks = Arc::new(InMemoryUnlockStore::default());
        let events = Arc::new(InMemoryEventStore::default());
        let channel = Arc::new(RecordingChannel::default());
        let clock = Arc::new(FixedClock(Utc::now()));

        let distributor =
            EventDistributor::new(events.clone(), channel.clone(), clock.clone());
        let unlock = ClueUnlock::new(unlocks.clone(), distributor.clone(), clock.clone());

        let service = SessionService::new(SessionDeps {
            sessions: sessions.clone(),
            participants,
            roles,
            unlocks: unlocks.clone(),
            provider,
            distributor,
            unlock,
            clock,
            rng: Arc::new(Mutex::new(MockRng)),
        });

        Harness {
            service,
            sessions,
            events,
            unlocks,
            channel,
        }
    }

    async fn seeded_session(h: &Harness, guests: &[&str]) -> Uuid {
        let session = h
            .service
            .create_session("Manor Night".to_owned(), "9911".to_owned())
            .await
            .unwrap();
        for guest in guests {
            h.service
                .add_participant(session.id, (*guest).to_owned(), None, None)
                .await
                .unwrap();
        }
        session.id
    }

    #[tokio::test]
    async fn test_generation_persists_package_and_moves_to_reviewing() {
        let h = harness(Arc::new(CannedProvider::new(sample_package(&[
            "Ann", "Bob", "Cleo",
        ]))));
        let session_id = seeded_session(&h, &["Ann", "Bob", "Cleo"]).await;

        let outcome = h.service.request_generation(session_id).await.unwrap();

        assert_eq!(outcome.roles_assigned, 3);
        assert!(outcome.validation.is_valid);

        let session = h.sessions.get(session_id).await.unwrap();
        assert_eq!(session.status, SessionStatus::Reviewing);
        assert!(session.victim.is_some());
        assert_eq!(session.physical_clues.len(), 3);

        // Exactly one murderer among the reconciled roles.
        let roles = h.service.list_roles(session_id).await.unwrap();
        assert_eq!(roles.iter().filter(|r| r.is_murderer).count(), 1);
    }

    #[tokio::test]
    async fn test_generation_seeds_unreleased_clue_events() {
        let h = harness(Arc::new(CannedProvider::new(sample_package(&["Ann", "Bob"]))));
        let session_id = seeded_session(&h, &["Ann", "Bob"]).await;

        h.service.request_generation(session_id).await.unwrap();

        let events = h.events.list_for_session(session_id).await.unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.trigger_time.is_none()));
        assert!(events[0].content.starts_with("[after body discovery]"));
        // Seeded clues are not pushed to subscribers.
        assert!(h.channel.published().is_empty());
        // Targeted clue reaches only the matching role's participant.
        assert!(matches!(events[0].audience, Audience::Targeted(ref ids) if ids.len() == 1));
        assert_eq!(events[1].audience, Audience::Broadcast);
    }

    #[tokio::test]
    async fn test_generation_replaces_unlock_codes_wholesale() {
        let h = harness(Arc::new(CannedProvider::new(sample_package(&["Ann"]))));
        let session_id = seeded_session(&h, &["Ann"]).await;

        h.service.request_generation(session_id).await.unwrap();
        let first = h.unlocks.find_code(session_id, "4417").await.unwrap().unwrap();

        h.service.request_generation(session_id).await.unwrap();
        let second = h.unlocks.find_code(session_id, "4417").await.unwrap().unwrap();

        // Same code value, fresh identity: the set was cleared and re-created.
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_provider_failure_leaves_session_untouched() {
        let h = harness(Arc::new(FailingProvider));
        let session_id = seeded_session(&h, &["Ann"]).await;

        let err = h.service.request_generation(session_id).await.unwrap_err();

        assert!(matches!(err, DomainError::Provider(_)));
        let session = h.sessions.get(session_id).await.unwrap();
        assert_eq!(session.status, SessionStatus::Planning);
        assert!(session.victim.is_none());
        assert!(h.events.list_for_session(session_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generation_without_participants_is_rejected() {
        let h = harness(Arc::new(CannedProvider::new(sample_package(&["Ann"]))));
        let session_id = seeded_session(&h, &[]).await;

        let err = h.service.request_generation(session_id).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_reconciliation_shortfall_still_saves_for_review() {
        // Package generated for three guests, roster only has two.
        let h = harness(Arc::new(CannedProvider::new(sample_package(&[
            "Ann", "Bob", "Cleo",
        ]))));
        let session_id = seeded_session(&h, &["Ann", "Bob"]).await;

        let outcome = h.service.request_generation(session_id).await.unwrap();

        assert_eq!(outcome.roles_assigned, 2);
        assert!(!outcome.warnings.is_empty());
        let session = h.sessions.get(session_id).await.unwrap();
        assert_eq!(session.status, SessionStatus::Reviewing);
    }

    #[tokio::test]
    async fn test_revise_requires_existing_generation() {
        let h = harness(Arc::new(CannedProvider::new(sample_package(&["Ann"]))));
        let session_id = seeded_session(&h, &["Ann"]).await;

        let err = h
            .service
            .revise_generation(session_id, "more drama")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        h.service.request_generation(session_id).await.unwrap();
        let outcome = h
            .service
            .revise_generation(session_id, "more drama")
            .await
            .unwrap();
        assert_eq!(outcome.roles_assigned, 1);
    }

    #[tokio::test]
    async fn test_send_event_rejects_empty_target_list() {
        let h = harness(Arc::new(CannedProvider::new(sample_package(&["Ann"]))));
        let session_id = seeded_session(&h, &["Ann"]).await;

        let err = h
            .service
            .send_event(session_id, "psst".to_owned(), Some(Vec::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::EmptyTargetSet));
    }

    #[tokio::test]
    async fn test_phase_announcement_is_broadcast_and_published() {
        let h = harness(Arc::new(CannedProvider::new(sample_package(&["Ann"]))));
        let session_id = seeded_session(&h, &["Ann"]).await;

        let event = h
            .service
            .announce_phase(
                session_id,
                PhaseAnnouncement::MurderReveal {
                    victim_name: "Colonel Hargrove".to_owned(),
                },
            )
            .await
            .unwrap();

        assert_eq!(event.audience, Audience::Broadcast);
        assert!(event.content.contains("Colonel Hargrove"));
        assert_eq!(h.channel.published().len(), 1);
    }

    #[tokio::test]
    async fn test_redeem_checks_session_membership() {
        let h = harness(Arc::new(CannedProvider::new(sample_package(&["Ann"]))));
        let session_id = seeded_session(&h, &["Ann"]).await;
        let other_session = seeded_session(&h, &["Zed"]).await;
        let stranger = h.service.roster(other_session).await.unwrap()[0].id;

        h.service.request_generation(session_id).await.unwrap();

        let err = h
            .service
            .redeem_code(session_id, stranger, "4417")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ParticipantNotFound(_)));
    }

    #[tokio::test]
    async fn test_stored_revalidation_matches_generation_report() {
        let h = harness(Arc::new(CannedProvider::new(sample_package(&[
            "Ann", "Bob", "Cleo",
        ]))));
        let session_id = seeded_session(&h, &["Ann", "Bob", "Cleo"]).await;

        let outcome = h.service.request_generation(session_id).await.unwrap();
        let revalidated = h.service.validate_solvability(session_id).await.unwrap();

        assert_eq!(outcome.validation.is_valid, revalidated.is_valid);
        assert_eq!(outcome.validation.score, revalidated.score);
    }

    #[tokio::test]
    async fn test_stored_estimate_uses_roster_and_stored_clues() {
        let h = harness(Arc::new(CannedProvider::new(sample_package(&["Ann", "Bob"]))));
        let session_id = seeded_session(&h, &["Ann", "Bob"]).await;
        h.service.request_generation(session_id).await.unwrap();

        let stored = h.service.estimate_duration(session_id).await.unwrap();
        // 3 physical, 2 digital, medium, 2 players:
        // 10 + 4 + 15 + 4 + (15 * 1.2 * 4 / 4) + 10 = 61.
        assert_eq!(stored.typical_time, 61);
    }

    #[tokio::test]
    async fn test_update_physical_clue_bounds_checked() {
        let h = harness(Arc::new(CannedProvider::new(sample_package(&["Ann"]))));
        let session_id = seeded_session(&h, &["Ann"]).await;
        h.service.request_generation(session_id).await.unwrap();

        let session = h.sessions.get(session_id).await.unwrap();
        let mut edited = session.physical_clues[0].clone();
        edited.description = "A freshly pressed handkerchief".to_owned();

        h.service
            .update_physical_clue(session_id, 0, edited)
            .await
            .unwrap();
        let session = h.sessions.get(session_id).await.unwrap();
        assert_eq!(
            session.physical_clues[0].description,
            "A freshly pressed handkerchief"
        );

        let err = h
            .service
            .update_physical_clue(session_id, 99, session.physical_clues[0].clone())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_add_participant_generates_pin_when_absent() {
        let h = harness(Arc::new(CannedProvider::new(sample_package(&["Ann"]))));
        let session_id = seeded_session(&h, &[]).await;

        let generated = h
            .service
            .add_participant(session_id, "Ann".to_owned(), None, None)
            .await
            .unwrap();
        assert_eq!(generated.access_pin, "1000"); // MockRng returns min

        let chosen = h
            .service
            .add_participant(session_id, "Bob".to_owned(), None, Some("7777".to_owned()))
            .await
            .unwrap();
        assert_eq!(chosen.access_pin, "7777");
    }
}
