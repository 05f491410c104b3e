//! Structural solvability validation.
//!
//! Deterministic rule checks over a package, each a deduction from a
//! starting score of 100. The murderer-count rule runs over the *reconciled*
//! role set, not the raw generation: it is the safety-critical invariant
//! that exactly one assigned role carries the murderer flag.

use serde::Serialize;

use whodunit_content::schema::MysteryPackage;
use whodunit_core::model::Role;
use whodunit_core::mystery::SolutionMetadata;

/// Result of a solvability check. `is_valid` never blocks saving or starting
/// the game; the host decides.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
    /// 0-100, floored at 0.
    pub score: u32,
}

/// The structural facts the rules run over. Built either from a fresh
/// package or from stored session state for re-validation.
#[derive(Debug, Clone, Copy)]
pub struct SolvabilityInput<'a> {
    pub solution: Option<&'a SolutionMetadata>,
    pub physical_clue_count: usize,
    pub digital_clue_count: usize,
    pub murderer_count: usize,
}

impl<'a> SolvabilityInput<'a> {
    /// View over a freshly generated package and its reconciled roles.
    #[must_use]
    pub fn of_package(package: &'a MysteryPackage, roles: &[Role]) -> Self {
        Self {
            solution: Some(&package.solution_metadata),
            physical_clue_count: package.physical_clues.len(),
            digital_clue_count: package.clues.len(),
            murderer_count: roles.iter().filter(|role| role.is_murderer).count(),
        }
    }
}

/// Runs the rule set. Pure and deterministic; never mutates its input.
#[must_use]
pub fn validate(input: &SolvabilityInput) -> ValidationReport {
    let mut issues = Vec::new();
    let mut score: i32 = 100;

    let has_steps = input
        .solution
        .is_some_and(|s| !s.complete_solution.steps.is_empty());
    if !has_steps {
        issues.push("No solution steps provided".to_owned());
        score -= 50;
    }

    let has_murder_time = input
        .solution
        .is_some_and(|s| !s.timeline.murder_time.trim().is_empty());
    if !has_murder_time {
        issues.push("No murder time specified".to_owned());
        score -= 20;
    }

    let total_clues = input.physical_clue_count + input.digital_clue_count;
    if total_clues < 5 {
        issues.push("Too few clues generated (minimum 5 total)".to_owned());
        score -= 20;
    }

    if input.murderer_count != 1 {
        issues.push(format!(
            "Invalid murderer count: {} (must be exactly 1)",
            input.murderer_count
        ));
        score -= 50;
    }

    let has_critical_clues = input
        .solution
        .is_some_and(|s| !s.complete_solution.critical_clues.is_empty());
    if !has_critical_clues {
        issues.push("No critical clues identified for solution".to_owned());
        score -= 10;
    }

    ValidationReport {
        is_valid: issues.is_empty(),
        score: score.max(0).unsigned_abs(),
        issues,
    }
}

/// Convenience wrapper for the generation pipeline.
#[must_use]
pub fn validate_package(package: &MysteryPackage, roles: &[Role]) -> ValidationReport {
    validate(&SolvabilityInput::of_package(package, roles))
}
