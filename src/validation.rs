//! Schedule invariant validation.
//!
//! Structural integrity checks for a full schedule. Detects:
//! - Duplicate players within one match
//! - Players booked twice in the same round
//! - Court numbers outside `[1, courts]` or repeated within a round
//! - Missing team slots for doubles structures
//! - Gaps in the round numbering

use std::collections::HashSet;

use crate::models::{schedule, GenderRule, Match, TournamentConfig};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A player id appears twice within one match.
    DuplicatePlayerInMatch,
    /// A player appears in two matches of the same round.
    DoubleBooking,
    /// A court number lies outside `[1, courts]`.
    CourtOutOfRange,
    /// A court number is used twice within one round.
    DuplicateCourt,
    /// A doubles-structure match is missing a team slot.
    IncompleteMatch,
    /// Round numbers do not form a contiguous sequence starting at 1.
    RoundGap,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a full schedule against the configuration.
///
/// Checks:
/// 1. Every match's present player ids are distinct
/// 2. Doubles and mixed matches carry four players, singles two
/// 3. No player appears twice within a round
/// 4. Courts within a round are unique and within `[1, courts]`
/// 5. Round numbers are contiguous starting at 1
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_schedule(matches: &[Match], config: &TournamentConfig) -> ValidationResult {
    let mut errors = Vec::new();
    let expected_players = config.gender_rule.players_per_match();

    for m in matches {
        let ids: Vec<&str> = m.player_ids().collect();
        let distinct: HashSet<&str> = ids.iter().copied().collect();
        if distinct.len() != ids.len() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePlayerInMatch,
                format!("match '{}' repeats a player", m.id),
            ));
        }
        if config.gender_rule != GenderRule::Singles && ids.len() != expected_players {
            errors.push(ValidationError::new(
                ValidationErrorKind::IncompleteMatch,
                format!(
                    "match '{}' has {} players, expected {}",
                    m.id,
                    ids.len(),
                    expected_players
                ),
            ));
        }
    }

    for (round, in_round) in schedule::by_round(matches) {
        let mut booked: HashSet<&str> = HashSet::new();
        let mut courts: HashSet<u32> = HashSet::new();
        for m in &in_round {
            for id in m.player_ids() {
                if !booked.insert(id) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DoubleBooking,
                        format!("player '{id}' is booked twice in round {round}"),
                    ));
                }
            }
            if m.court < 1 || m.court > config.courts {
                errors.push(ValidationError::new(
                    ValidationErrorKind::CourtOutOfRange,
                    format!("round {round} uses court {} of {}", m.court, config.courts),
                ));
            } else if !courts.insert(m.court) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateCourt,
                    format!("round {round} uses court {} twice", m.court),
                ));
            }
        }
    }

    if !matches.is_empty() {
        let rounds: Vec<u32> = schedule::by_round(matches).keys().copied().collect();
        let expected: Vec<u32> = (1..=schedule::last_round(matches)).collect();
        if rounds != expected {
            errors.push(ValidationError::new(
                ValidationErrorKind::RoundGap,
                format!("rounds {rounds:?} are not contiguous from 1"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
