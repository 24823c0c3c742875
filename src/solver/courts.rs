//! Court assignment.
//!
//! Maps the matches selected for a round onto court numbers. Courts are
//! filled in ascending order; each court takes the remaining match whose
//! players have collectively used that court the least (rotation first),
//! with lower combined match count breaking ties (fairness second).
//!
//! Assignment is the moment a match becomes fixed: round, court, time
//! label and serving team are stamped here and the attempt state is
//! updated for every participant.

use rand::Rng;

use super::candidates::MatchCandidate;
use super::state::AttemptState;
use crate::models::{Match, Player, TournamentConfig};

/// One selected match for a round, sides as roster indices.
#[derive(Debug, Clone)]
pub struct RoundPick {
    /// Team 1 (one or two players).
    pub side1: Vec<usize>,
    /// Team 2 (one or two players).
    pub side2: Vec<usize>,
}

impl RoundPick {
    /// Converts a selected candidate into a pick.
    pub fn from_candidate(candidate: &MatchCandidate) -> Self {
        Self {
            side1: candidate.side1.members().collect(),
            side2: candidate.side2.members().collect(),
        }
    }

    /// All participants, team 1 first.
    pub fn members(&self) -> impl Iterator<Item = usize> + '_ {
        self.side1.iter().chain(&self.side2).copied()
    }
}

/// Assigns the round's picks to courts and stamps them into [`Match`]es.
///
/// Fewer picks than courts leaves the highest court numbers empty for the
/// round; more picks than courts never happens (selection is capped).
pub fn assign_courts<R: Rng>(
    mut picks: Vec<RoundPick>,
    round: u32,
    players: &[Player],
    config: &TournamentConfig,
    state: &mut AttemptState,
    rng: &mut R,
) -> Vec<Match> {
    let mut matches = Vec::with_capacity(picks.len());

    for court in 1..=config.courts {
        if picks.is_empty() {
            break;
        }
        let next = picks
            .iter()
            .enumerate()
            .min_by_key(|(_, pick)| {
                let court_uses: u32 = pick.members().map(|i| state.court_uses(i, court)).sum();
                let total_played: u32 = pick.members().map(|i| state.match_count(i)).sum();
                (court_uses, total_played)
            })
            .map(|(idx, _)| idx);
        let Some(idx) = next else { break };
        let pick = picks.remove(idx);

        let (Some(&a), Some(&b)) = (pick.side1.first(), pick.side2.first()) else {
            continue;
        };
        let mut m = Match::new(
            format!("{:08x}", rng.random::<u32>()),
            players[a].clone(),
            pick.side1.get(1).map(|&i| players[i].clone()),
            players[b].clone(),
            pick.side2.get(1).map(|&i| players[i].clone()),
        );
        m.round = round;
        m.court = court;
        m.time = config.round_time_label(round);
        m.serving_team = rng.random_range(1..=2);

        state.record_match(round, court, &pick.side1, &pick.side2);
        matches.push(m);
    }
    matches
}
