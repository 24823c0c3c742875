//! Round classification.
//!
//! Buckets a round's candidate matches into priority tiers — gender-target
//! adherence crossed with fairness adherence — and orders each tier with a
//! multi-key comparator. Buckets are consumed strictly in order when
//! filling a round, so target-gender and fairness are exhausted before any
//! less desirable filler is considered.
//!
//! # Comparator
//!
//! Within a bucket, ascending by: maximum match count among participants,
//! sum of match counts, skill range (max − min), earliest registration
//! timestamp.

use chrono::NaiveDateTime;

use super::candidates::MatchCandidate;
use super::state::AttemptState;
use crate::models::{Gender, Player};

/// Priority tier for a candidate match within one round.
///
/// Processed in declaration order; a lower tier is only consulted once the
/// tiers above it are exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bucket {
    /// Matches the round's target gender and keeps counts balanced.
    TargetFair,
    /// Matches the target gender but lets an already-ahead player play.
    TargetAhead,
    /// Off-target gender, counts balanced.
    NonTargetFair,
    /// Off-target gender, counts unbalanced. Last resort.
    NonTargetAhead,
}

impl Bucket {
    /// Fixed consumption order.
    pub const ORDER: [Bucket; 4] = [
        Bucket::TargetFair,
        Bucket::TargetAhead,
        Bucket::NonTargetFair,
        Bucket::NonTargetAhead,
    ];

    fn of(is_target: bool, is_fair: bool) -> Self {
        match (is_target, is_fair) {
            (true, true) => Bucket::TargetFair,
            (true, false) => Bucket::TargetAhead,
            (false, true) => Bucket::NonTargetFair,
            (false, false) => Bucket::NonTargetAhead,
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            Bucket::TargetFair => 0,
            Bucket::TargetAhead => 1,
            Bucket::NonTargetFair => 2,
            Bucket::NonTargetAhead => 3,
        }
    }
}

/// Buckets the eligible candidates (indices into `pool`) for one round and
/// sorts each bucket by the comparator. Returns the four buckets in
/// consumption order.
pub fn classify_round(
    pool: &[MatchCandidate],
    eligible: &[usize],
    players: &[Player],
    state: &AttemptState,
    target: Option<Gender>,
) -> [Vec<usize>; 4] {
    let floor_men = state.fairness_floor(players, Gender::Male);
    let floor_women = state.fairness_floor(players, Gender::Female);

    let mut buckets: [Vec<usize>; 4] = Default::default();
    for &ci in eligible {
        let candidate = &pool[ci];
        let is_target = match target {
            Some(gender) => candidate.category().matches_target(gender),
            None => true,
        };
        let is_fair = candidate.members().all(|i| {
            let floor = match players[i].gender {
                Gender::Male => floor_men,
                Gender::Female => floor_women,
            };
            state.match_count(i) <= floor + 1
        });
        buckets[Bucket::of(is_target, is_fair).index()].push(ci);
    }

    for bucket in &mut buckets {
        bucket.sort_by_key(|&ci| sort_key(&pool[ci], players, state));
    }
    buckets
}

/// Multi-key comparator value: prefer matches whose most-played participant
/// is least advanced, then lowest total play, tightest skill spread, and
/// earliest registration.
fn sort_key(
    candidate: &MatchCandidate,
    players: &[Player],
    state: &AttemptState,
) -> (u32, u32, i32, NaiveDateTime) {
    let mut max_count = 0;
    let mut sum_count = 0;
    let mut min_skill = i32::MAX;
    let mut max_skill = i32::MIN;
    let mut earliest = NaiveDateTime::MAX;

    for i in candidate.members() {
        let count = state.match_count(i);
        max_count = max_count.max(count);
        sum_count += count;
        let p = &players[i];
        min_skill = min_skill.min(p.skill);
        max_skill = max_skill.max(p.skill);
        earliest = earliest.min(p.registration_time);
    }
    (max_count, sum_count, max_skill - min_skill, earliest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GenderRule;
    use crate::solver::candidates::build_candidates;
    use crate::solver::pairs::build_pairs;

    fn roster(genders: &[Gender]) -> Vec<Player> {
        genders
            .iter()
            .enumerate()
            .map(|(i, &g)| Player::new(format!("p{i}"), format!("P{i}"), g))
            .collect()
    }

    fn all_indices(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_bucket_consumption_order() {
        assert_eq!(
            Bucket::ORDER,
            [
                Bucket::TargetFair,
                Bucket::TargetAhead,
                Bucket::NonTargetFair,
                Bucket::NonTargetAhead,
            ]
        );
        assert!(Bucket::TargetFair < Bucket::NonTargetAhead);
    }

    #[test]
    fn test_target_and_fairness_split() {
        use Gender::*;
        // 4 men and 4 women: one all-male and one all-female candidate
        // after a sweep over [mm, mm, ..] pool ordering.
        let players = roster(&[Male, Male, Male, Male, Female, Female, Female, Female]);
        let pool = build_candidates(&build_pairs(&players, GenderRule::Doubles));
        assert!(!pool.is_empty());

        let state = AttemptState::new(players.len());
        // Round 1 targets women.
        let buckets = classify_round(&pool, &all_indices(pool.len()), &players, &state, Some(Female));

        let women_candidates: Vec<_> = buckets[0].clone();
        assert!(!women_candidates.is_empty());
        for &ci in &women_candidates {
            assert!(pool[ci].members().all(|i| players[i].gender == Female));
        }
        // Counts are all zero, so nothing is unfair.
        assert!(buckets[1].is_empty());
        assert!(buckets[3].is_empty());
        for &ci in &buckets[2] {
            assert!(pool[ci].members().all(|i| players[i].gender == Male));
        }
    }

    #[test]
    fn test_ahead_players_demote_candidates() {
        use Gender::*;
        let players = roster(&[Male, Male, Male, Male]);
        let pool = build_candidates(&build_pairs(&players, GenderRule::Doubles));

        let mut state = AttemptState::new(players.len());
        // p0 gets two matches ahead of the floor.
        state.record_match(1, 1, &[0, 1], &[2, 3]);
        state.record_match(3, 1, &[0, 1], &[2, 3]);
        state.record_match(5, 1, &[0], &[1]);
        state.record_match(7, 1, &[0], &[2]);

        let buckets = classify_round(&pool, &all_indices(pool.len()), &players, &state, Some(Male));
        // Every candidate includes p0, who is now 2 above p3's floor.
        assert!(buckets[0].is_empty());
        assert_eq!(buckets[1].len(), pool.len());
    }

    #[test]
    fn test_no_target_mode_uses_fair_buckets_only() {
        use Gender::*;
        let players = roster(&[Male, Female, Male, Female]);
        let pool = build_candidates(&build_pairs(&players, GenderRule::MixedDoubles));

        let state = AttemptState::new(players.len());
        let buckets = classify_round(&pool, &all_indices(pool.len()), &players, &state, None);
        assert_eq!(buckets[0].len(), pool.len());
        assert!(buckets[2].is_empty());
    }

    #[test]
    fn test_comparator_prefers_least_played() {
        use Gender::*;
        let players = roster(&[Male; 8]);
        let pool = build_candidates(&build_pairs(&players, GenderRule::Doubles));

        let mut state = AttemptState::new(players.len());
        // Players 0..4 have played once, 4..8 have not.
        state.record_match(1, 1, &[0, 1], &[2, 3]);

        let buckets = classify_round(&pool, &all_indices(pool.len()), &players, &state, Some(Male));
        let first = &pool[buckets[0][0]];
        assert!(
            first.members().all(|i| i >= 4),
            "fresh players sort ahead of played ones"
        );
    }
}
