//! In-process realtime channel over `tokio::sync::broadcast`.
//!
//! One sender per session keeps fan-out per-session FIFO. Subscribers that
//! fall behind observe a lagged error from the broadcast receiver; the
//! channel does not buffer beyond its fixed capacity.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::broadcast;
use uuid::Uuid;

use whodunit_core::channel::RealtimeChannel;
use whodunit_core::error::DomainError;
use whodunit_core::model::NarrativeEvent;

const CHANNEL_CAPACITY: usize = 256;

/// Broadcast-backed channel for a single process.
pub struct BroadcastChannel {
    senders: Mutex<HashMap<Uuid, broadcast::Sender<NarrativeEvent>>>,
}

impl Default for BroadcastChannel {
    fn default() -> Self {
        Self {
            senders: Mutex::new(HashMap::new()),
        }
    }
}

impl BroadcastChannel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to the per-session stream. Filtering per viewer happens at
    /// the subscription consumer via `NarrativeEvent::is_recipient`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn subscribe(&self, session_id: Uuid) -> broadcast::Receiver<NarrativeEvent> {
        let mut senders = self.senders.lock().unwrap();
        senders
            .entry(session_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }
}

#[async_trait]
impl RealtimeChannel for BroadcastChannel {
    async fn publish(&self, event: &NarrativeEvent) -> Result<(), DomainError> {
        let sender = {
            let senders = self
                .senders
                .lock()
                .map_err(|_| DomainError::Infrastructure("channel mutex poisoned".into()))?;
            senders.get(&event.session_id).cloned()
        };

        if let Some(sender) = sender {
            // A send error only means no subscribers right now.
            let _ = sender.send(event.clone());
        }

        Ok(())
    }
}
