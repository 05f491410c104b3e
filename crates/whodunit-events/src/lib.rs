//! Narrative event distribution and visibility.
//!
//! Decides which participants receive a narrative event and pushes it through
//! the realtime channel. Targeting itself is pure (`NarrativeEvent::
//! is_recipient`); this crate adds the persist-then-publish engine, the
//! host's fixed phase announcements, and an in-process broadcast channel.

pub mod channel;
pub mod distributor;
pub mod phase;

pub use channel::BroadcastChannel;
pub use distributor::EventDistributor;
pub use phase::PhaseAnnouncement;
