//! Regeneration preserve-boundary computation.
//!
//! When a player withdraws or a manual re-shuffle is requested, the caller
//! keeps everything that already happened and regenerates the rest. The
//! boundary is the highest round containing any scored match, extended to
//! cover every round whose time slot has fully elapsed.
//!
//! Time labels that fail to parse are tolerated: the affected round is
//! conservatively treated as not yet started, so it is regenerated rather
//! than frozen.

use chrono::{Duration, NaiveDateTime};

use crate::models::{schedule, Match, TournamentConfig};

/// Format of the per-match `time` label.
pub const TIME_LABEL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Highest round number to preserve when regenerating at `now`.
///
/// Returns 0 when nothing needs preserving (empty schedule, or no scored
/// or elapsed rounds).
pub fn preserve_boundary(matches: &[Match], config: &TournamentConfig, now: NaiveDateTime) -> u32 {
    let max_scored = matches
        .iter()
        .filter(|m| m.is_scored())
        .map(|m| m.round)
        .max()
        .unwrap_or(0);

    // First round that has not finished by `now`, judged by its time label.
    let mut first_unfinished = 0;
    for (round, in_round) in schedule::by_round(matches) {
        let label = in_round.first().map(|m| m.time.as_str()).unwrap_or("");
        let finished = match NaiveDateTime::parse_from_str(label, TIME_LABEL_FORMAT) {
            Ok(start) => start + Duration::minutes(config.duration) <= now,
            Err(_) => false,
        };
        if !finished {
            first_unfinished = round;
            break;
        }
    }

    let mut boundary = max_scored;
    if first_unfinished > 0 {
        boundary = boundary.max(first_unfinished.saturating_sub(1));
    } else if !matches.is_empty() {
        // Every round lies in the past: preserve all of them.
        boundary = boundary.max(schedule::last_round(matches));
    }
    boundary
}

/// The matches to pass as history when regenerating at `now`.
pub fn preserved_history(
    matches: &[Match],
    config: &TournamentConfig,
    now: NaiveDateTime,
) -> Vec<Match> {
    let boundary = preserve_boundary(matches, config, now);
    matches.iter().filter(|m| m.round <= boundary).cloned().collect()
}
