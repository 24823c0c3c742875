//! Match model.
//!
//! A match is a four-slot contest: `p1`/`p2` form team 1, `p3`/`p4` form
//! team 2. In singles play each side has a single occupant and the second
//! slot of each team is `None` — a player identity never appears twice
//! within one match.
//!
//! Round, court, time and serving team are placeholders until the match is
//! selected into a round and assigned a court; from that point on they are
//! fixed. Scores are attached later by the score-entry collaborator.

use serde::{Deserialize, Serialize};

use super::Player;

/// A scheduled or candidate contest between two teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Short random identifier assigned at scheduling time.
    pub id: String,
    /// Team 1, first slot.
    pub p1: Player,
    /// Team 1, second slot (`None` in singles play).
    pub p2: Option<Player>,
    /// Team 2, first slot.
    pub p3: Player,
    /// Team 2, second slot (`None` in singles play).
    pub p4: Option<Player>,
    /// Round number, 1-based. Zero until scheduled.
    pub round: u32,
    /// Court number, 1-based. Zero until scheduled.
    pub court: u32,
    /// Formatted start time label (`%Y-%m-%d %H:%M`). Empty until scheduled.
    pub time: String,
    /// Team 1 score, if entered.
    pub score1: Option<i32>,
    /// Team 2 score, if entered.
    pub score2: Option<i32>,
    /// Which team serves first: 1 or 2.
    pub serving_team: u8,
}

impl Match {
    /// Creates an unscheduled match between two teams.
    pub fn new(
        id: impl Into<String>,
        p1: Player,
        p2: Option<Player>,
        p3: Player,
        p4: Option<Player>,
    ) -> Self {
        Self {
            id: id.into(),
            p1,
            p2,
            p3,
            p4,
            round: 0,
            court: 0,
            time: String::new(),
            score1: None,
            score2: None,
            serving_team: 1,
        }
    }

    /// All players present in the match, team 1 first.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        [Some(&self.p1), self.p2.as_ref(), Some(&self.p3), self.p4.as_ref()]
            .into_iter()
            .flatten()
    }

    /// Ids of all players present in the match.
    pub fn player_ids(&self) -> impl Iterator<Item = &str> {
        self.players().map(|p| p.id.as_str())
    }

    /// Team 1 members (one or two players).
    pub fn team1(&self) -> impl Iterator<Item = &Player> {
        [Some(&self.p1), self.p2.as_ref()].into_iter().flatten()
    }

    /// Team 2 members (one or two players).
    pub fn team2(&self) -> impl Iterator<Item = &Player> {
        [Some(&self.p3), self.p4.as_ref()].into_iter().flatten()
    }

    /// Whether the given player takes part in this match.
    pub fn involves(&self, player_id: &str) -> bool {
        self.player_ids().any(|id| id == player_id)
    }

    /// Whether any score has been entered.
    #[inline]
    pub fn is_scored(&self) -> bool {
        self.score1.is_some() || self.score2.is_some()
    }

    /// Display label for team 1 (`"Alice/Bob"`, or just the name in singles).
    pub fn team1_label(&self) -> String {
        self.team1().map(|p| p.name.as_str()).collect::<Vec<_>>().join("/")
    }

    /// Display label for team 2.
    pub fn team2_label(&self) -> String {
        self.team2().map(|p| p.name.as_str()).collect::<Vec<_>>().join("/")
    }

    /// Winner label derived from the scores.
    ///
    /// Team 1 names if they scored higher, team 2 names if they did,
    /// `"Draw"` on equal scores, empty when either score is missing.
    pub fn winner_label(&self) -> String {
        match (self.score1, self.score2) {
            (Some(s1), Some(s2)) if s1 > s2 => self.team1_label(),
            (Some(s1), Some(s2)) if s2 > s1 => self.team2_label(),
            (Some(_), Some(_)) => "Draw".into(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn player(id: &str, name: &str) -> Player {
        Player::new(id, name, Gender::Male)
    }

    fn doubles_match() -> Match {
        Match::new(
            "m1",
            player("a", "Alice"),
            Some(player("b", "Bob")),
            player("c", "Cara"),
            Some(player("d", "Dan")),
        )
    }

    #[test]
    fn test_players_order() {
        let m = doubles_match();
        let ids: Vec<_> = m.player_ids().collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_singles_width_one_sides() {
        let m = Match::new("s1", player("a", "Alice"), None, player("c", "Cara"), None);
        assert_eq!(m.players().count(), 2);
        assert_eq!(m.team1().count(), 1);
        assert_eq!(m.team2().count(), 1);
        assert_eq!(m.team1_label(), "Alice");
    }

    #[test]
    fn test_involves() {
        let m = doubles_match();
        assert!(m.involves("b"));
        assert!(!m.involves("z"));
    }

    #[test]
    fn test_winner_label() {
        let mut m = doubles_match();
        assert_eq!(m.winner_label(), "");
        assert!(!m.is_scored());

        m.score1 = Some(21);
        m.score2 = Some(15);
        assert!(m.is_scored());
        assert_eq!(m.winner_label(), "Alice/Bob");

        m.score2 = Some(23);
        assert_eq!(m.winner_label(), "Cara/Dan");

        m.score2 = Some(21);
        assert_eq!(m.winner_label(), "Draw");
    }

    #[test]
    fn test_partial_score_has_no_winner() {
        let mut m = doubles_match();
        m.score1 = Some(21);
        assert!(m.is_scored());
        assert_eq!(m.winner_label(), "");
    }
}
