//! The distribution engine: durably record, then publish.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use whodunit_core::channel::RealtimeChannel;
use whodunit_core::clock::Clock;
use whodunit_core::error::DomainError;
use whodunit_core::model::{Audience, NarrativeEvent};
use whodunit_core::store::EventStore;

/// Persists narrative events and fans them out.
///
/// Publishing is fire-and-forget relative to the core: once the event is
/// durably recorded, a channel failure is logged and swallowed. Redelivery
/// guarantees beyond per-session FIFO belong to the channel itself.
#[derive(Clone)]
pub struct EventDistributor {
    events: Arc<dyn EventStore>,
    channel: Arc<dyn RealtimeChannel>,
    clock: Arc<dyn Clock>,
}

impl EventDistributor {
    #[must_use]
    pub fn new(
        events: Arc<dyn EventStore>,
        channel: Arc<dyn RealtimeChannel>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            events,
            channel,
            clock,
        }
    }

    /// Records a released event and publishes it.
    ///
    /// # Errors
    ///
    /// Returns an error when persistence fails; publish failures do not
    /// propagate.
    pub async fn send(
        &self,
        session_id: Uuid,
        content: String,
        audience: Audience,
    ) -> Result<NarrativeEvent, DomainError> {
        let now = self.clock.now();
        self.record(session_id, content, audience, Some(now)).await
    }

    /// Records an event without releasing it (`trigger_time` stays unset).
    /// Used for the pre-generated clues seeded at generation time; nothing
    /// is pushed to subscribers until the host sends it.
    pub async fn seed(
        &self,
        session_id: Uuid,
        content: String,
        audience: Audience,
    ) -> Result<NarrativeEvent, DomainError> {
        self.record(session_id, content, audience, None).await
    }

    async fn record(
        &self,
        session_id: Uuid,
        content: String,
        audience: Audience,
        trigger_time: Option<DateTime<Utc>>,
    ) -> Result<NarrativeEvent, DomainError> {
        let event = NarrativeEvent {
            id: Uuid::new_v4(),
            session_id,
            content,
            created_at: self.clock.now(),
            trigger_time,
            audience,
        };

        self.events.append(&event).await?;

        if event.trigger_time.is_some() {
            if let Err(err) = self.channel.publish(&event).await {
                warn!(event_id = %event.id, %err, "realtime publish failed after durable append");
            }
        }

        Ok(event)
    }

    /// Event history for one viewer. A participant sees only events they are
    /// a recipient of; the host (`viewer` of `None`) sees everything. This is
    /// the server-side filtering that keeps broadcast-vs-targeted logic out
    /// of every consumer.
    pub async fn history_for(
        &self,
        session_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<Vec<NarrativeEvent>, DomainError> {
        let events = self.events.list_for_session(session_id).await?;
        Ok(match viewer {
            None => events,
            Some(participant_id) => events
                .into_iter()
                .filter(|event| event.is_recipient(participant_id))
                .collect(),
        })
    }
}
