//! Player (roster entry) model.
//!
//! A player is owned by the roster collaborator; the scheduler reads it
//! and never mutates it. Identity (`id`) is stable for the lifetime of a
//! tournament, display fields may change between scheduling calls.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Gender category used by pairing rules.
///
/// Rosters use the single-letter form (`"M"` / `"F"`); parsing is
/// case-insensitive and also accepts the spelled-out words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Men's category (`"M"`).
    #[serde(rename = "M", alias = "m")]
    Male,
    /// Women's category (`"F"`).
    #[serde(rename = "F", alias = "f")]
    Female,
}

impl Gender {
    /// Parses a gender label case-insensitively.
    ///
    /// Returns `None` for anything that is not `M`/`F`/`male`/`female`.
    pub fn parse(label: &str) -> Option<Gender> {
        match label.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Some(Gender::Male),
            "f" | "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// A tournament participant.
///
/// `registration_time` is the deterministic tie-break used when ordering
/// otherwise-equal match candidates (earliest-registered first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Stable short identifier, unique within a tournament.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Integer skill rating.
    pub skill: i32,
    /// Gender category.
    pub gender: Gender,
    /// Display color (hex string), owned by the UI collaborator.
    pub color: String,
    /// Registration timestamp, earliest-first tie-break.
    pub registration_time: NaiveDateTime,
    /// Whether the player has withdrawn from the tournament.
    pub is_out: bool,
}

impl Player {
    /// Creates a new player with default display fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            skill: 3,
            gender,
            color: "#ffffff".into(),
            registration_time: NaiveDateTime::default(),
            is_out: false,
        }
    }

    /// Sets the skill rating.
    pub fn with_skill(mut self, skill: i32) -> Self {
        self.skill = skill;
        self
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the registration timestamp.
    pub fn with_registration_time(mut self, at: NaiveDateTime) -> Self {
        self.registration_time = at;
        self
    }

    /// Marks the player as withdrawn.
    pub fn with_out(mut self, is_out: bool) -> Self {
        self.is_out = is_out;
        self
    }

    /// Whether the player is still active (not withdrawn).
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.is_out
    }
}
