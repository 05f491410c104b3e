//! Deterministic solvability validation and duration estimation.
//!
//! Pure functions over generated content: a structural solvability check and
//! a play-time estimate. Both are side-effect free and callable repeatedly on
//! the same inputs, which is what lets the host re-run them after edits.

pub mod duration;
pub mod solvability;

pub use duration::{DurationBreakdown, DurationEstimate, DurationInput, estimate, estimate_package};
pub use solvability::{SolvabilityInput, ValidationReport, validate, validate_package};
