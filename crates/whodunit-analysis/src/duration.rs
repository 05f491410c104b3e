//! Session duration estimation.
//!
//! A deterministic heuristic over package structure and participant count.
//! All times are minutes.

use serde::Serialize;

use whodunit_content::schema::MysteryPackage;
use whodunit_core::mystery::Difficulty;

const INTRO_TIME: f64 = 10.0;
const ROLE_READING_PER_PLAYER: f64 = 2.0;
const PHYSICAL_CLUE_TIME: f64 = 5.0;
const DIGITAL_CLUE_TIME: f64 = 2.0;
const BASE_INVESTIGATION_TIME: f64 = 15.0;
const REVEAL_TIME: f64 = 10.0;

/// Phase subtotals for display.
#[derive(Debug, Clone, Serialize)]
pub struct DurationBreakdown {
    pub intro_and_role_reading: u32,
    pub clue_discovery: u32,
    pub investigation: u32,
    pub accusation_and_reveal: u32,
}

/// Estimated play time with a fast/typical/thorough spread.
#[derive(Debug, Clone, Serialize)]
pub struct DurationEstimate {
    pub minimum_time: u32,
    pub typical_time: u32,
    pub maximum_time: u32,
    pub breakdown: DurationBreakdown,
    /// Human-readable inputs for display and debugging, not for computation.
    pub factors: Vec<String>,
}

/// The structural facts the estimate runs over.
#[derive(Debug, Clone, Copy)]
pub struct DurationInput {
    pub physical_clue_count: usize,
    pub digital_clue_count: usize,
    /// Defaults to medium semantics when the package carries no rating.
    pub difficulty: Option<Difficulty>,
}

impl DurationInput {
    /// View over a generated package.
    #[must_use]
    pub fn of_package(package: &MysteryPackage) -> Self {
        Self {
            physical_clue_count: package.physical_clues.len(),
            digital_clue_count: package.clues.len(),
            difficulty: Some(package.solution_metadata.difficulty_rating),
        }
    }
}

fn complexity_multiplier(difficulty: Option<Difficulty>) -> f64 {
    match difficulty {
        Some(Difficulty::Hard) => 1.5,
        Some(Difficulty::Medium) | None => 1.2,
        Some(Difficulty::Easy) => 1.0,
    }
}

/// Computes the estimate. Pure and deterministic.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn estimate(input: &DurationInput, participant_count: usize) -> DurationEstimate {
    #[allow(clippy::cast_precision_loss)]
    let players = participant_count as f64;
    #[allow(clippy::cast_precision_loss)]
    let physical = input.physical_clue_count as f64;
    #[allow(clippy::cast_precision_loss)]
    let digital = input.digital_clue_count as f64;

    let role_reading_time = ROLE_READING_PER_PLAYER * players;
    let physical_clue_time = PHYSICAL_CLUE_TIME * physical;
    let digital_clue_time = DIGITAL_CLUE_TIME * digital;

    // Investigation scales with head count: more people means more talking.
    let investigation_time =
        BASE_INVESTIGATION_TIME * complexity_multiplier(input.difficulty) * players.max(4.0) / 4.0;

    let typical = INTRO_TIME
        + role_reading_time
        + physical_clue_time
        + digital_clue_time
        + investigation_time
        + REVEAL_TIME;

    let difficulty_label = match input.difficulty {
        Some(Difficulty::Easy) => "easy",
        Some(Difficulty::Medium) | None => "medium",
        Some(Difficulty::Hard) => "hard",
    };

    DurationEstimate {
        minimum_time: (typical * 0.7).round() as u32,
        typical_time: typical.round() as u32,
        maximum_time: (typical * 1.5).round() as u32,
        breakdown: DurationBreakdown {
            intro_and_role_reading: (INTRO_TIME + role_reading_time).round() as u32,
            clue_discovery: (physical_clue_time + digital_clue_time).round() as u32,
            investigation: investigation_time.round() as u32,
            accusation_and_reveal: REVEAL_TIME.round() as u32,
        },
        factors: vec![
            format!("{participant_count} players"),
            format!("{} physical clues", input.physical_clue_count),
            format!("{} digital clues", input.digital_clue_count),
            format!("Difficulty: {difficulty_label}"),
        ],
    }
}

/// Convenience wrapper for the generation pipeline.
#[must_use]
pub fn estimate_package(package: &MysteryPackage, participant_count: usize) -> DurationEstimate {
    estimate(&DurationInput::of_package(package), participant_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(physical: usize, digital: usize, difficulty: Option<Difficulty>) -> DurationInput {
        DurationInput {
            physical_clue_count: physical,
            digital_clue_count: digital,
            difficulty,
        }
    }

    #[test]
    fn test_reference_scenario_six_players_medium() {
        // 10 + 12 + 20 + 6 + (15 * 1.2 * 6 / 4) + 10 = 85 minutes.
        let estimate = estimate(&input(4, 3, Some(Difficulty::Medium)), 6);

        assert_eq!(estimate.typical_time, 85);
        assert_eq!(estimate.minimum_time, 60);
        assert_eq!(estimate.maximum_time, 128);
        assert_eq!(estimate.breakdown.intro_and_role_reading, 22);
        assert_eq!(estimate.breakdown.clue_discovery, 26);
        assert_eq!(estimate.breakdown.investigation, 27);
        assert_eq!(estimate.breakdown.accusation_and_reveal, 10);
    }

    #[test]
    fn test_missing_difficulty_defaults_to_medium_semantics() {
        let with_default = estimate(&input(4, 3, None), 6);
        let with_medium = estimate(&input(4, 3, Some(Difficulty::Medium)), 6);
        assert_eq!(with_default.typical_time, with_medium.typical_time);
        assert!(
            with_default
                .factors
                .iter()
                .any(|f| f == "Difficulty: medium")
        );
    }

    #[test]
    fn test_small_groups_floor_investigation_at_four_players() {
        let two = estimate(&input(0, 0, Some(Difficulty::Easy)), 2);
        // 10 + 4 + 15*1.0*4/4 + 10 = 39.
        assert_eq!(two.typical_time, 39);
        assert_eq!(two.breakdown.investigation, 15);
    }

    #[test]
    fn test_hard_difficulty_scales_investigation() {
        let hard = estimate(&input(0, 0, Some(Difficulty::Hard)), 8);
        // investigation = 15 * 1.5 * 8 / 4 = 45.
        assert_eq!(hard.breakdown.investigation, 45);
    }

    #[test]
    fn test_factors_describe_the_inputs() {
        let estimate = estimate(&input(4, 3, Some(Difficulty::Medium)), 6);
        assert_eq!(
            estimate.factors,
            vec![
                "6 players".to_owned(),
                "4 physical clues".to_owned(),
                "3 digital clues".to_owned(),
                "Difficulty: medium".to_owned(),
            ]
        );
    }
}
