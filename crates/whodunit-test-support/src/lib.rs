//! Shared test doubles and fixtures for the Whodunit party engine.

mod channel;
mod clock;
mod fixtures;
mod provider;
mod rng;
mod stores;

pub use channel::RecordingChannel;
pub use clock::FixedClock;
pub use fixtures::{sample_package, sample_participant, sample_session};
pub use provider::{CannedProvider, FailingProvider};
pub use rng::{MockRng, SequenceRng};
pub use stores::{
    InMemoryEventStore, InMemoryParticipantStore, InMemoryRoleStore, InMemorySessionStore,
    InMemoryUnlockStore,
};
