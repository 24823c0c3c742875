//! Interchange formats.
//!
//! The scheduler itself persists nothing; these are the shapes its output
//! must serialize into cleanly for the persistence and export
//! collaborators: a JSON document embedding roster, configuration and the
//! full match list, and a CSV table with one row per match.

use serde::{Deserialize, Serialize};

use crate::models::{Match, Player, TournamentConfig};

/// CSV column header, one row per match ordered by round then court.
pub const CSV_HEADER: [&str; 10] = [
    "Round", "Time", "Court", "Player1", "Player2", "Player3", "Player4", "Score1", "Score2",
    "Winner",
];

/// The persisted tournament document: roster, configuration and schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentDocument {
    /// Full roster, including withdrawn players.
    pub players: Vec<Player>,
    /// Tournament configuration.
    pub config: TournamentConfig,
    /// Full match list, history and generated rounds alike.
    pub schedule: Vec<Match>,
}

/// Renders the schedule as CSV with the [`CSV_HEADER`] columns.
///
/// Rows are ordered by round then court. The winner column carries the
/// winning team's names, `Draw` on equal scores, and is blank while a
/// match is unscored. Empty slots (singles play) render as empty cells.
pub fn schedule_to_csv(matches: &[Match]) -> Result<String, csv::Error> {
    let mut ordered: Vec<&Match> = matches.iter().collect();
    ordered.sort_by_key(|m| (m.round, m.court));

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for m in ordered {
        let name = |p: &Option<Player>| p.as_ref().map(|p| p.name.clone()).unwrap_or_default();
        let score = |s: Option<i32>| s.map(|v| v.to_string()).unwrap_or_default();
        writer.write_record([
            m.round.to_string(),
            m.time.clone(),
            m.court.to_string(),
            m.p1.name.clone(),
            name(&m.p2),
            m.p3.name.clone(),
            name(&m.p4),
            score(m.score1),
            score(m.score2),
            m.winner_label(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, GenderRule};

    fn player(id: &str, name: &str) -> Player {
        Player::new(id, name, Gender::Male)
    }

    fn scheduled(round: u32, court: u32) -> Match {
        let mut m = Match::new(
            format!("m{round}-{court}"),
            player("a", "Alice"),
            Some(player("b", "Bob")),
            player("c", "Cara"),
            Some(player("d", "Dan")),
        );
        m.round = round;
        m.court = court;
        m.time = "2025-06-14 18:00".into();
        m
    }

    #[test]
    fn test_csv_header_and_ordering() {
        let matches = vec![scheduled(2, 1), scheduled(1, 2), scheduled(1, 1)];
        let csv = schedule_to_csv(&matches).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Round,Time,Court,Player1,Player2,Player3,Player4,Score1,Score2,Winner"
        );
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("1,2025-06-14 18:00,1,"));
        assert!(lines[2].starts_with("1,2025-06-14 18:00,2,"));
        assert!(lines[3].starts_with("2,"));
    }

    #[test]
    fn test_csv_winner_column() {
        let mut won = scheduled(1, 1);
        won.score1 = Some(21);
        won.score2 = Some(12);
        let mut draw = scheduled(1, 2);
        draw.score1 = Some(15);
        draw.score2 = Some(15);
        let unscored = scheduled(2, 1);

        let csv = schedule_to_csv(&[won, draw, unscored]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert!(lines[1].ends_with("21,12,Alice/Bob"));
        assert!(lines[2].ends_with("15,15,Draw"));
        assert!(lines[3].ends_with(",,"));
    }

    #[test]
    fn test_csv_singles_blank_slots() {
        let mut m = Match::new("s", player("a", "Alice"), None, player("c", "Cara"), None);
        m.round = 1;
        m.court = 1;
        m.time = "2025-06-14 18:00".into();

        let csv = schedule_to_csv(&[m]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], "1,2025-06-14 18:00,1,Alice,,Cara,,,,");
    }

    #[test]
    fn test_document_round_trips_through_json() {
        let players = vec![player("a", "Alice"), player("b", "Bob")];
        let config = TournamentConfig::new(2, GenderRule::MixedDoubles);
        let doc = TournamentDocument {
            players: players.clone(),
            config,
            schedule: vec![scheduled(1, 1)],
        };

        let json = serde_json::to_string_pretty(&doc).unwrap();
        let back: TournamentDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back.players, players);
        assert_eq!(back.schedule.len(), 1);
        assert_eq!(back.schedule[0].player_ids().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
        assert_eq!(back.config.gender_rule, GenderRule::MixedDoubles);
    }
}
