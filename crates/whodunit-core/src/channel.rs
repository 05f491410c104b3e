//! Realtime channel abstraction.
//!
//! The engine only needs to push "insert happened" notifications with the new
//! event payload. Delivery is fire-and-forget relative to the core: once an
//! event is durably recorded, a publish failure is logged, not propagated.
//! Ordering beyond per-session FIFO is a collaborator concern.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::model::NarrativeEvent;

/// Publish side of the realtime channel.
#[async_trait]
pub trait RealtimeChannel: Send + Sync {
    async fn publish(&self, event: &NarrativeEvent) -> Result<(), DomainError>;
}
