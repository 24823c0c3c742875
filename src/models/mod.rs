//! Tournament domain models.
//!
//! Core data types shared by the solver, validation and export layers:
//! players, matches, configuration and schedule queries. All types are
//! serde-serializable so a caller can embed them directly in its persisted
//! tournament document.

mod config;
mod matches;
mod player;
pub mod schedule;

pub use config::{GenderRule, SchedulingMode, TournamentConfig};
pub use matches::Match;
pub use player::{Gender, Player};
