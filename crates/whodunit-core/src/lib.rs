//! Shared domain abstractions for the whodunit workspace.
//!
//! This crate defines the domain model and the traits through which the
//! orchestration engine consumes its external collaborators (datastore,
//! realtime channel, clock, randomness). It contains no infrastructure code.

pub mod channel;
pub mod clock;
pub mod error;
pub mod model;
pub mod mystery;
pub mod rng;
pub mod store;
