//! Schedule quality metrics (KPIs).
//!
//! Computes diversity and fairness indicators from a full schedule:
//! per-player match count spread, partner repetition, opponent spread and
//! court rotation. The orchestrator uses [`ScheduleKpi::penalty_score`] as
//! its final tie-break between equally sized attempt schedules, and logs
//! the partner/opponent statistics after every generation run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Match spread | max − min matches per active player |
//! | Partner repeats | times a partnership occurred beyond the first |
//! | Opponent spread | max − min meetings across opposing pairs |
//! | Court repeats | times a player re-used a court beyond the first |
//! | Occupancy | matches / (rounds × courts) |

use std::collections::HashMap;

use crate::models::{schedule, Match, Player, TournamentConfig};

/// Relative penalty weights. Magnitudes are tunable; the ordering
/// (court rotation over partner repeats over opponent spread) is not.
const COURT_REPEAT_WEIGHT: f64 = 500.0;
const PARTNER_REPEAT_WEIGHT: f64 = 100.0;
const OPPONENT_SPREAD_WEIGHT: f64 = 10.0;

/// Fairness and diversity indicators for one schedule.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Total matches.
    pub matches: usize,
    /// Highest round number.
    pub rounds: u32,
    /// Fewest matches played by any active player.
    pub min_matches: u32,
    /// Most matches played by any active player.
    pub max_matches: u32,
    /// Most times any partnership occurred.
    pub partner_repeat_max: u32,
    /// Partnership occurrences beyond the first, summed.
    pub partner_excess: u32,
    /// Mean occurrences per observed partnership.
    pub partner_avg: f64,
    /// Fewest meetings across observed opposing pairs.
    pub opponent_min: u32,
    /// Most meetings across observed opposing pairs.
    pub opponent_max: u32,
    /// Mean meetings per observed opposing pair.
    pub opponent_avg: f64,
    /// Variance of meetings across observed opposing pairs.
    pub opponent_variance: f64,
    /// Court re-uses beyond each player's first visit, summed.
    pub court_repeat_total: u32,
    /// Matches relative to full court capacity (0.0..1.0).
    pub occupancy: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule, its active roster and configuration.
    pub fn calculate(matches: &[Match], players: &[Player], config: &TournamentConfig) -> Self {
        let mut partner_tally: HashMap<(String, String), u32> = HashMap::new();
        let mut opponent_tally: HashMap<(String, String), u32> = HashMap::new();
        let mut court_visits: HashMap<(String, u32), u32> = HashMap::new();

        for m in matches {
            let team1: Vec<&str> = m.team1().map(|p| p.id.as_str()).collect();
            let team2: Vec<&str> = m.team2().map(|p| p.id.as_str()).collect();
            if let [a, b] = team1[..] {
                *partner_tally.entry(ordered_key(a, b)).or_insert(0) += 1;
            }
            if let [a, b] = team2[..] {
                *partner_tally.entry(ordered_key(a, b)).or_insert(0) += 1;
            }
            for &x in &team1 {
                for &y in &team2 {
                    *opponent_tally.entry(ordered_key(x, y)).or_insert(0) += 1;
                }
            }
            for p in m.players() {
                *court_visits.entry((p.id.clone(), m.court)).or_insert(0) += 1;
            }
        }

        let counts: Vec<u32> = players
            .iter()
            .map(|p| schedule::matches_played(matches, &p.id) as u32)
            .collect();
        let rounds = schedule::last_round(matches);

        let partner_repeat_max = partner_tally.values().copied().max().unwrap_or(0);
        let partner_excess = partner_tally.values().map(|&c| c.saturating_sub(1)).sum();
        let partner_avg = mean(partner_tally.values());
        let opponent_min = opponent_tally.values().copied().min().unwrap_or(0);
        let opponent_max = opponent_tally.values().copied().max().unwrap_or(0);
        let opponent_avg = mean(opponent_tally.values());
        let opponent_variance = variance(opponent_tally.values(), opponent_avg);
        let court_repeat_total = court_visits.values().map(|&c| c.saturating_sub(1)).sum();

        let capacity = rounds as f64 * config.courts as f64;
        let occupancy = if capacity > 0.0 {
            matches.len() as f64 / capacity
        } else {
            0.0
        };

        Self {
            matches: matches.len(),
            rounds,
            min_matches: counts.iter().copied().min().unwrap_or(0),
            max_matches: counts.iter().copied().max().unwrap_or(0),
            partner_repeat_max,
            partner_excess,
            partner_avg,
            opponent_min,
            opponent_max,
            opponent_avg,
            opponent_variance,
            court_repeat_total,
            occupancy,
        }
    }

    /// Weighted diversity penalty, lower is better.
    ///
    /// Court rotation dominates partner repeats, which dominate opponent
    /// spread; opponent variance is the final fraction.
    pub fn penalty_score(&self) -> f64 {
        COURT_REPEAT_WEIGHT * self.court_repeat_total as f64
            + PARTNER_REPEAT_WEIGHT * self.partner_excess as f64
            + OPPONENT_SPREAD_WEIGHT * (self.opponent_max - self.opponent_min) as f64
            + self.opponent_variance
    }

    /// Whether per-player match counts stay within the given spread.
    pub fn is_balanced(&self, max_spread: u32) -> bool {
        self.max_matches - self.min_matches <= max_spread
    }
}

fn ordered_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

fn mean<'a>(values: impl Iterator<Item = &'a u32>) -> f64 {
    let (sum, n) = values.fold((0u64, 0u64), |(s, n), &v| (s + v as u64, n + 1));
    if n == 0 {
        0.0
    } else {
        sum as f64 / n as f64
    }
}

fn variance<'a>(values: impl Iterator<Item = &'a u32>, avg: f64) -> f64 {
    let (sum_sq, n) = values.fold((0f64, 0u64), |(s, n), &v| {
        let d = v as f64 - avg;
        (s + d * d, n + 1)
    });
    if n == 0 {
        0.0
    } else {
        sum_sq / n as f64
    }
}
