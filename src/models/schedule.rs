//! Schedule queries.
//!
//! A schedule is an ordered list of [`Match`] values partitioned by round.
//! The list itself is the interchange currency (callers own it and may
//! persist or regenerate it); this module provides the round-oriented
//! queries the solver, validation and export layers share.

use std::collections::BTreeMap;

use super::Match;

/// Highest round number present, 0 for an empty schedule.
pub fn last_round(matches: &[Match]) -> u32 {
    matches.iter().map(|m| m.round).max().unwrap_or(0)
}

/// Matches grouped by round, in ascending round order.
pub fn by_round(matches: &[Match]) -> BTreeMap<u32, Vec<&Match>> {
    let mut rounds: BTreeMap<u32, Vec<&Match>> = BTreeMap::new();
    for m in matches {
        rounds.entry(m.round).or_default().push(m);
    }
    rounds
}

/// Matches belonging to one round.
pub fn in_round(matches: &[Match], round: u32) -> Vec<&Match> {
    matches.iter().filter(|m| m.round == round).collect()
}

/// Number of matches a given player appears in.
pub fn matches_played(matches: &[Match], player_id: &str) -> usize {
    matches.iter().filter(|m| m.involves(player_id)).count()
}
