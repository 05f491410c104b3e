//! Session orchestration for the hosting workflow.
//!
//! The top-level use cases: turn a generation request into persisted,
//! validated content; manage the roster and lifecycle; route play-time
//! events and code redemptions through the engines underneath.

pub mod service;

pub use service::{GenerationOutcome, SessionDeps, SessionDetails, SessionService};
