//! Round-based match scheduler for court sports.
//!
//! Produces an assignment of players to matches, courts and time slots for
//! every round a tournament's time window can hold, optionally continuing
//! from a partial history of already-played rounds. The engine balances
//! multiple competing pressures — per-player fairness, partner and
//! opponent diversity, gender constraints and court rotation — with a
//! scored greedy construction, branch-and-bound subset selection and a
//! parallel multi-attempt search.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Player`, `Match`, `TournamentConfig`,
//!   `GenderRule`, plus round-oriented schedule queries
//! - **`solver`**: Engine internals — pair building, candidate assembly,
//!   round classification, disjoint selection, court assignment
//! - **`scheduler`**: The public `Scheduler` orchestrator, schedule KPIs
//!   and the regeneration preserve-boundary
//! - **`export`**: CSV and JSON interchange shapes
//! - **`validation`**: Structural invariant checks over produced schedules
//!
//! # Guarantees
//!
//! Every produced schedule keeps matches player-disjoint within a round,
//! court numbers unique and in range per round, round numbers contiguous,
//! and history untouched. The search is heuristic: schedules are good, not
//! provably optimal.

pub mod export;
pub mod models;
pub mod scheduler;
pub mod solver;
pub mod validation;
