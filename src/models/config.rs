//! Tournament configuration.
//!
//! The configuration bounds the schedule: the court count caps matches per
//! round, and the wall-clock window divided by the round interval
//! (duration + break) caps the number of rounds.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::Gender;

/// Gender rule selecting the match structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenderRule {
    /// Same-gender doubles: both teams drawn from one gender category.
    Doubles,
    /// Same-gender singles: 1v1 contests within one gender category.
    Singles,
    /// Mixed doubles: 2 men + 2 women per match, one of each per team.
    #[serde(rename = "MixedDouble")]
    MixedDoubles,
}

impl GenderRule {
    /// Whether rounds alternate a target gender (odd rounds favor women,
    /// even rounds men). Mixed doubles has no target.
    pub fn is_alternating(self) -> bool {
        matches!(self, GenderRule::Doubles | GenderRule::Singles)
    }

    /// The gender favored in the given round, if the rule alternates.
    pub fn round_target(self, round: u32) -> Option<Gender> {
        if !self.is_alternating() {
            return None;
        }
        if round % 2 == 1 {
            Some(Gender::Female)
        } else {
            Some(Gender::Male)
        }
    }

    /// Players per team side: 2 for doubles structures, 1 for singles.
    pub fn players_per_side(self) -> usize {
        match self {
            GenderRule::Singles => 1,
            GenderRule::Doubles | GenderRule::MixedDoubles => 2,
        }
    }

    /// Players consumed by one match.
    pub fn players_per_match(self) -> usize {
        self.players_per_side() * 2
    }
}

/// Scheduling mode. Carried for interchange fidelity; the solver does not
/// branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulingMode {
    Balanced,
    Complete,
}

/// Court, timing and rule configuration for one tournament.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Number of courts available each round.
    pub courts: u32,
    /// Match duration in minutes.
    pub duration: i64,
    /// Break between rounds in minutes.
    pub break_time: i64,
    /// Start of the scheduling window.
    pub start_time: NaiveDateTime,
    /// End of the scheduling window.
    pub end_time: NaiveDateTime,
    /// Scheduling mode.
    pub mode: SchedulingMode,
    /// Gender rule.
    pub gender_rule: GenderRule,
}

impl TournamentConfig {
    /// Creates a configuration with the default timing (12 minute matches,
    /// 1 minute breaks) and an empty window.
    pub fn new(courts: u32, gender_rule: GenderRule) -> Self {
        Self {
            courts,
            duration: 12,
            break_time: 1,
            start_time: NaiveDateTime::default(),
            end_time: NaiveDateTime::default(),
            mode: SchedulingMode::Balanced,
            gender_rule,
        }
    }

    /// Sets the scheduling window.
    pub fn with_window(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.start_time = start;
        self.end_time = end;
        self
    }

    /// Sets the match duration in minutes.
    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration = minutes;
        self
    }

    /// Sets the inter-round break in minutes.
    pub fn with_break_time(mut self, minutes: i64) -> Self {
        self.break_time = minutes;
        self
    }

    /// Sets the scheduling mode.
    pub fn with_mode(mut self, mode: SchedulingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Minutes consumed by one round: match duration plus break.
    #[inline]
    pub fn round_interval(&self) -> i64 {
        self.duration + self.break_time
    }

    /// Total minutes in the scheduling window.
    pub fn window_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Highest round number that fits the window.
    ///
    /// Floor of window / interval; in alternating-gender modes the result
    /// is rounded down to an even number so both genders receive the same
    /// number of target rounds.
    pub fn max_rounds(&self) -> u32 {
        let interval = self.round_interval();
        if interval <= 0 {
            return 0;
        }
        let mut rounds = self.window_minutes() / interval;
        if rounds < 0 {
            return 0;
        }
        if self.gender_rule.is_alternating() && rounds % 2 == 1 {
            rounds -= 1;
        }
        rounds as u32
    }

    /// Formatted start time label for the given round.
    pub fn round_time_label(&self, round: u32) -> String {
        let offset = Duration::minutes(self.round_interval() * (round as i64 - 1));
        (self.start_time + offset).format("%Y-%m-%d %H:%M").to_string()
    }
}
