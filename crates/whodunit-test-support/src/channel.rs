//! Recording realtime channel.

use std::sync::Mutex;

use async_trait::async_trait;

use whodunit_core::channel::RealtimeChannel;
use whodunit_core::error::DomainError;
use whodunit_core::model::NarrativeEvent;

/// Captures every published event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    published: Mutex<Vec<NarrativeEvent>>,
}

impl RecordingChannel {
    /// Snapshot of everything published so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn published(&self) -> Vec<NarrativeEvent> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl RealtimeChannel for RecordingChannel {
    async fn publish(&self, event: &NarrativeEvent) -> Result<(), DomainError> {
        self.published.lock().unwrap().push(event.clone());
        Ok(())
    }
}
