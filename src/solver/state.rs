//! Per-attempt scheduling state.
//!
//! One [`AttemptState`] aggregates every mutable counter a solve needs:
//! match counts, rest markers, court usage and partner/opponent tallies.
//! Each attempt owns its state exclusively, so the parallel search never
//! shares mutable data.
//!
//! Players are addressed by index into the active roster slice; history
//! entries for withdrawn players (absent from the roster) are skipped.

use std::collections::HashMap;

use crate::models::{Gender, Match, Player};

/// Mutable counters for one scheduling attempt.
#[derive(Debug, Clone)]
pub struct AttemptState {
    counts: Vec<u32>,
    free_at: Vec<u32>,
    court_use: Vec<HashMap<u32, u32>>,
    partners: HashMap<(usize, usize), u32>,
    opponents: HashMap<(usize, usize), u32>,
}

impl AttemptState {
    /// Creates a zeroed state for a roster of the given size.
    pub fn new(roster_len: usize) -> Self {
        Self {
            counts: vec![0; roster_len],
            free_at: vec![0; roster_len],
            court_use: vec![HashMap::new(); roster_len],
            partners: HashMap::new(),
            opponents: HashMap::new(),
        }
    }

    /// Seeds counters from already-played history.
    ///
    /// Participants that are no longer on the roster are ignored; their
    /// matches still count for everyone else in them.
    pub fn seed_from_history(&mut self, history: &[Match], players: &[Player]) {
        let index: HashMap<&str, usize> = players
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.as_str(), i))
            .collect();

        for m in history {
            let side1: Vec<usize> = m.team1().filter_map(|p| index.get(p.id.as_str()).copied()).collect();
            let side2: Vec<usize> = m.team2().filter_map(|p| index.get(p.id.as_str()).copied()).collect();
            self.record_sides(m.round, m.court, &side1, &side2);
        }
    }

    /// Records a newly assigned match.
    pub fn record_match(&mut self, round: u32, court: u32, side1: &[usize], side2: &[usize]) {
        self.record_sides(round, court, side1, side2);
    }

    fn record_sides(&mut self, round: u32, court: u32, side1: &[usize], side2: &[usize]) {
        for &i in side1.iter().chain(side2) {
            self.counts[i] += 1;
            // One round of rest before the player is eligible again.
            self.free_at[i] = self.free_at[i].max(round + 2);
            *self.court_use[i].entry(court).or_insert(0) += 1;
        }
        if let [a, b] = side1 {
            *self.partners.entry(ordered(*a, *b)).or_insert(0) += 1;
        }
        if let [a, b] = side2 {
            *self.partners.entry(ordered(*a, *b)).or_insert(0) += 1;
        }
        for &x in side1 {
            for &y in side2 {
                *self.opponents.entry(ordered(x, y)).or_insert(0) += 1;
            }
        }
    }

    /// Matches played by the given roster index.
    #[inline]
    pub fn match_count(&self, index: usize) -> u32 {
        self.counts[index]
    }

    /// Whether the player may be scheduled in the given round.
    #[inline]
    pub fn is_free(&self, index: usize, round: u32) -> bool {
        self.free_at[index] <= round
    }

    /// Times the player has already played on the given court.
    #[inline]
    pub fn court_uses(&self, index: usize, court: u32) -> u32 {
        self.court_use[index].get(&court).copied().unwrap_or(0)
    }

    /// Times two players have been on the same team.
    pub fn partner_count(&self, a: usize, b: usize) -> u32 {
        self.partners.get(&ordered(a, b)).copied().unwrap_or(0)
    }

    /// Times two players have faced each other.
    pub fn opponent_count(&self, a: usize, b: usize) -> u32 {
        self.opponents.get(&ordered(a, b)).copied().unwrap_or(0)
    }

    /// Minimum match count among roster players of the given gender.
    ///
    /// This is the fairness threshold: a match keeps counts balanced when
    /// no participant is more than one above their gender's minimum.
    pub fn fairness_floor(&self, players: &[Player], gender: Gender) -> u32 {
        players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.gender == gender)
            .map(|(i, _)| self.counts[i])
            .min()
            .unwrap_or(0)
    }
}

#[inline]
fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Player};

    fn roster(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| {
                let gender = if i % 2 == 0 { Gender::Male } else { Gender::Female };
                Player::new(format!("p{i}"), format!("P{i}"), gender)
            })
            .collect()
    }

    #[test]
    fn test_record_match_updates_counters() {
        let mut state = AttemptState::new(6);
        state.record_match(1, 2, &[0, 1], &[2, 3]);

        for i in 0..4 {
            assert_eq!(state.match_count(i), 1);
            assert_eq!(state.court_uses(i, 2), 1);
            assert!(!state.is_free(i, 2));
            assert!(state.is_free(i, 3));
        }
        assert_eq!(state.match_count(4), 0);
        assert!(state.is_free(4, 1));

        assert_eq!(state.partner_count(0, 1), 1);
        assert_eq!(state.partner_count(2, 3), 1);
        assert_eq!(state.partner_count(0, 2), 0);
        assert_eq!(state.opponent_count(0, 2), 1);
        assert_eq!(state.opponent_count(1, 3), 1);
        assert_eq!(state.opponent_count(0, 1), 0);
    }

    #[test]
    fn test_singles_sides_have_no_partner_tally() {
        let mut state = AttemptState::new(4);
        state.record_match(1, 1, &[0], &[1]);
        assert_eq!(state.partner_count(0, 1), 0);
        assert_eq!(state.opponent_count(0, 1), 1);
        assert_eq!(state.match_count(0), 1);
    }

    #[test]
    fn test_seed_from_history_skips_unknown_players() {
        let players = roster(4);
        let gone = Player::new("gone", "Gone", Gender::Male);
        let mut m = Match::new(
            "h1",
            players[0].clone(),
            Some(gone),
            players[2].clone(),
            Some(players[3].clone()),
        );
        m.round = 3;
        m.court = 1;

        let mut state = AttemptState::new(players.len());
        state.seed_from_history(&[m], &players);

        assert_eq!(state.match_count(0), 1);
        assert_eq!(state.match_count(1), 0); // the withdrawn player's slot
        assert_eq!(state.opponent_count(0, 2), 1);
        assert!(!state.is_free(0, 4));
        assert!(state.is_free(0, 5));
    }

    #[test]
    fn test_fairness_floor_per_gender() {
        let players = roster(4); // p0,p2 male; p1,p3 female
        let mut state = AttemptState::new(4);
        state.record_match(1, 1, &[0, 1], &[2, 3]);
        state.record_match(3, 1, &[0, 1], &[2, 3]);
        state.record_match(5, 2, &[0], &[2]);

        assert_eq!(state.fairness_floor(&players, Gender::Male), 3);
        assert_eq!(state.fairness_floor(&players, Gender::Female), 2);
    }
}
