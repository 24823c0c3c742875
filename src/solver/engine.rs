//! Per-attempt solve.
//!
//! Runs the round-by-round construction for one attempt: shuffle the pair
//! pool, assemble candidates once, then for every remaining round classify
//! the eligible candidates, fill the courts bucket by bucket, top up with
//! the fallback fill, and fix the round onto courts.
//!
//! Nothing here throws for unsatisfiable rounds: a court that cannot be
//! filled is left empty and the loop moves on.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::candidates::build_candidates;
use super::classify::classify_round;
use super::courts::{assign_courts, RoundPick};
use super::pairs::Pair;
use super::state::AttemptState;
use super::subset::{mask_blocks, player_mask, select_disjoint};
use crate::models::{Gender, GenderRule, Match, Player, TournamentConfig};

/// Solves all rounds in `start_round..=max_rounds` for one attempt.
///
/// `players` is the active roster; `pair_pool` is the shared deterministic
/// pool, copied and shuffled attempt-locally with the given seed. Returns
/// only the newly generated matches.
pub fn solve_attempt(
    players: &[Player],
    config: &TournamentConfig,
    history: &[Match],
    start_round: u32,
    max_rounds: u32,
    pair_pool: &[Pair],
    seed: u64,
) -> Vec<Match> {
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut pool: Vec<Pair> = pair_pool.to_vec();
    pool.shuffle(&mut rng);
    let candidates = build_candidates(&pool);
    let mut consumed = vec![false; candidates.len()];

    let mut state = AttemptState::new(players.len());
    state.seed_from_history(history, players);

    let blocks = mask_blocks(players.len());
    let mut generated = Vec::new();

    for round in start_round..=max_rounds {
        let mut picks: Vec<RoundPick> = Vec::new();
        let mut booked = vec![false; players.len()];

        let eligible: Vec<usize> = (0..candidates.len())
            .filter(|&ci| {
                !consumed[ci] && candidates[ci].members().all(|i| state.is_free(i, round))
            })
            .collect();

        let target = config.gender_rule.round_target(round);
        let buckets = classify_round(&candidates, &eligible, players, &state, target);

        for bucket in &buckets {
            let open = (config.courts as usize).saturating_sub(picks.len());
            if open == 0 {
                break;
            }
            let available: Vec<usize> = bucket
                .iter()
                .copied()
                .filter(|&ci| candidates[ci].members().all(|i| !booked[i]))
                .collect();
            if available.is_empty() {
                continue;
            }
            let masks: Vec<Vec<u64>> = available
                .iter()
                .map(|&ci| player_mask(&candidates[ci], blocks))
                .collect();
            for pos in select_disjoint(&masks, open) {
                let ci = available[pos];
                consumed[ci] = true;
                for i in candidates[ci].members() {
                    booked[i] = true;
                }
                picks.push(RoundPick::from_candidate(&candidates[ci]));
            }
        }

        fill_remaining(&mut picks, &mut booked, players, config, &state, round, &mut rng);

        generated.extend(assign_courts(picks, round, players, config, &mut state, &mut rng));
    }
    generated
}

/// Fallback fill for courts the candidate pool could not cover.
///
/// Available players are ordered rested-first, then fewest matches, then
/// randomly. Gender-consistent groups are tried first (the round target
/// gender ahead of the other in alternating modes, 2+2 in mixed); when no
/// such group exists the fill is unconstrained.
fn fill_remaining<R: Rng>(
    picks: &mut Vec<RoundPick>,
    booked: &mut [bool],
    players: &[Player],
    config: &TournamentConfig,
    state: &AttemptState,
    round: u32,
    rng: &mut R,
) {
    let rule = config.gender_rule;
    let per_match = rule.players_per_match();

    while picks.len() < config.courts as usize {
        let mut available: Vec<(usize, u32)> = players
            .iter()
            .enumerate()
            .filter(|(i, _)| !booked[*i])
            .map(|(i, _)| (i, rng.random::<u32>()))
            .collect();
        if available.len() < per_match {
            break;
        }
        available.sort_by_key(|&(i, tiebreak)| {
            let resting = u32::from(!state.is_free(i, round));
            (resting, state.match_count(i), tiebreak)
        });
        let ordered: Vec<usize> = available.into_iter().map(|(i, _)| i).collect();

        let Some(group) = pick_group(&ordered, players, rule, round) else {
            break;
        };
        for &i in &group {
            booked[i] = true;
        }
        picks.push(arrange_sides(&group, players, rule));
    }
}

/// Chooses the next group of players for a fallback match, preferring a
/// gender-consistent group before an unconstrained one.
fn pick_group(
    ordered: &[usize],
    players: &[Player],
    rule: GenderRule,
    round: u32,
) -> Option<Vec<usize>> {
    let per_match = rule.players_per_match();
    let of_gender = |gender: Gender| -> Vec<usize> {
        ordered
            .iter()
            .copied()
            .filter(|&i| players[i].gender == gender)
            .take(per_match)
            .collect()
    };

    match rule {
        GenderRule::Doubles | GenderRule::Singles => {
            let mut preference = [Gender::Male, Gender::Female];
            if rule.round_target(round) == Some(Gender::Female) {
                preference.swap(0, 1);
            }
            for gender in preference {
                let group = of_gender(gender);
                if group.len() == per_match {
                    return Some(group);
                }
            }
        }
        GenderRule::MixedDoubles => {
            let men = of_gender(Gender::Male);
            let women = of_gender(Gender::Female);
            if men.len() >= 2 && women.len() >= 2 {
                return Some(vec![men[0], women[0], men[1], women[1]]);
            }
        }
    }

    // Unconstrained last resort.
    (ordered.len() >= per_match).then(|| ordered[..per_match].to_vec())
}

/// Splits a chosen group into two sides. Mixed groups of two men and two
/// women get one of each per side; everything else splits down the middle.
fn arrange_sides(group: &[usize], players: &[Player], rule: GenderRule) -> RoundPick {
    if rule == GenderRule::Singles {
        return RoundPick {
            side1: vec![group[0]],
            side2: vec![group[1]],
        };
    }
    let men: Vec<usize> = group.iter().copied().filter(|&i| players[i].gender == Gender::Male).collect();
    let women: Vec<usize> = group.iter().copied().filter(|&i| players[i].gender == Gender::Female).collect();
    if rule == GenderRule::MixedDoubles && men.len() == 2 && women.len() == 2 {
        return RoundPick {
            side1: vec![men[0], women[0]],
            side2: vec![men[1], women[1]],
        };
    }
    RoundPick {
        side1: group[..2].to_vec(),
        side2: group[2..4].to_vec(),
    }
}
