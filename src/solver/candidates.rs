//! Match candidate assembly.
//!
//! Combines disjoint, category-compatible pairs from a pool into 4-player
//! (2-player in singles) match candidates with unassigned round, court and
//! time.
//!
//! # Algorithm
//!
//! A single greedy forward sweep: for each unconsumed pair, take the first
//! later unconsumed pair that shares no player and has the same category,
//! emit the candidate and mark both pairs consumed. The sweep is not
//! exhaustive — a pair can be wasted when nothing ahead of it combines —
//! which the multi-attempt search mitigates by reshuffling the pool.

use super::pairs::{Pair, PairCategory};

/// A prospective match: two pair sides, not yet scheduled.
#[derive(Debug, Clone, Copy)]
pub struct MatchCandidate {
    /// Team 1.
    pub side1: Pair,
    /// Team 2.
    pub side2: Pair,
}

impl MatchCandidate {
    /// Gender shape of the candidate (both sides share it).
    pub fn category(&self) -> PairCategory {
        self.side1.category
    }

    /// Roster indices of every participant, team 1 first.
    pub fn members(&self) -> impl Iterator<Item = usize> {
        self.side1.members().chain(self.side2.members())
    }

    /// Whether the candidate uses the given roster index.
    pub fn contains(&self, index: usize) -> bool {
        self.side1.contains(index) || self.side2.contains(index)
    }
}

/// Sweeps the pool in order, combining compatible pairs into candidates.
pub fn build_candidates(pool: &[Pair]) -> Vec<MatchCandidate> {
    let mut consumed = vec![false; pool.len()];
    let mut candidates = Vec::new();

    for i in 0..pool.len() {
        if consumed[i] {
            continue;
        }
        let side1 = pool[i];
        let partner = (i + 1..pool.len()).find(|&j| {
            !consumed[j] && side1.is_disjoint(&pool[j]) && pool[j].category == side1.category
        });
        if let Some(j) = partner {
            consumed[i] = true;
            consumed[j] = true;
            candidates.push(MatchCandidate {
                side1,
                side2: pool[j],
            });
        }
    }
    candidates
}
