//! Clue unlock code redemption.
//!
//! Short numeric codes printed on physical clues unlock digital content in
//! the app. Per (code, participant) pair the state machine is `locked` →
//! `unlocked`, terminal once unlocked. The transition is made atomic by a
//! conditional insert at the storage layer, never an unguarded
//! read-then-write, so two near-simultaneous redemptions cannot both emit an
//! event.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use whodunit_core::clock::Clock;
use whodunit_core::error::DomainError;
use whodunit_core::model::{Audience, UnlockCode, UnlockRecord};
use whodunit_core::mystery::{PhysicalClue, UnlockedContent};
use whodunit_core::store::UnlockStore;
use whodunit_events::EventDistributor;

/// Prefix for the narrative event that delivers unlocked content.
pub const UNLOCKED_CLUE_PREFIX: &str = "[UNLOCKED CLUE]";

/// Result of a redemption attempt.
#[derive(Debug, Clone, Serialize)]
pub struct Redemption {
    /// `true` on idempotent replay: the pair was already unlocked, the same
    /// content is returned and no new event was emitted.
    pub already_unlocked: bool,
    pub content: UnlockedContent,
}

/// Builds the unlock codes for a freshly generated physical-clue list.
/// One code per clue that declares `has_unlock_code` and actually carries a
/// code and content; the clue's index is the join key.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn codes_for_clues(session_id: Uuid, clues: &[PhysicalClue]) -> Vec<UnlockCode> {
    clues
        .iter()
        .enumerate()
        .filter_map(|(index, clue)| {
            if !clue.has_unlock_code {
                return None;
            }
            let code = clue.unlock_code.as_ref()?;
            let content = clue.unlocked_content.as_ref()?;
            Some(UnlockCode {
                id: Uuid::new_v4(),
                session_id,
                clue_index: index as i32,
                code: code.clone(),
                unlocked_content: content.clone(),
                broadcast_to_all: content.broadcast_to_all,
            })
        })
        .collect()
}

/// Redemption service.
#[derive(Clone)]
pub struct ClueUnlock {
    unlocks: Arc<dyn UnlockStore>,
    distributor: EventDistributor,
    clock: Arc<dyn Clock>,
}

impl ClueUnlock {
    #[must_use]
    pub fn new(
        unlocks: Arc<dyn UnlockStore>,
        distributor: EventDistributor,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            unlocks,
            distributor,
            clock,
        }
    }

    /// Redeems a code for one participant.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCode`] for an unknown code (no state
    /// change), or a storage error.
    pub async fn redeem(
        &self,
        session_id: Uuid,
        participant_id: Uuid,
        code: &str,
    ) -> Result<Redemption, DomainError> {
        let unlock_code = self
            .unlocks
            .find_code(session_id, code)
            .await?
            .ok_or(DomainError::InvalidCode)?;

        let record = UnlockRecord {
            unlock_code_id: unlock_code.id,
            participant_id,
            unlocked_at: self.clock.now(),
        };

        let inserted = self.unlocks.try_record_unlock(&record).await?;
        if !inserted {
            return Ok(Redemption {
                already_unlocked: true,
                content: unlock_code.unlocked_content,
            });
        }

        info!(
            %participant_id,
            clue_index = unlock_code.clue_index,
            broadcast = unlock_code.broadcast_to_all,
            "unlock code redeemed"
        );

        let audience = if unlock_code.broadcast_to_all {
            Audience::Broadcast
        } else {
            Audience::targeted(vec![participant_id])?
        };

        let content = format!(
            "{UNLOCKED_CLUE_PREFIX} {}",
            unlock_code.unlocked_content.content
        );
        self.distributor.send(session_id, content, audience).await?;

        Ok(Redemption {
            already_unlocked: false,
            content: unlock_code.unlocked_content,
        })
    }
}
