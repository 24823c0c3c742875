//! Scheduling engine internals.
//!
//! The machinery behind [`crate::scheduler::Scheduler`], in data-flow
//! order:
//!
//! 1. **`pairs`** — eligible partnerships from the roster and gender rule
//! 2. **`candidates`** — greedy assembly of pairs into match candidates
//! 3. **`classify`** — per-round priority buckets and ordering
//! 4. **`subset`** — branch-and-bound disjoint selection up to the court count
//! 5. **`courts`** — court rotation and match fixing
//!
//! `state` carries every mutable counter for one attempt and `engine`
//! drives the round loop. All of it is deterministic given a seed; the
//! orchestrator layers randomness by shuffling each attempt's pair pool.

pub mod candidates;
pub mod classify;
pub mod courts;
pub mod engine;
pub mod pairs;
pub mod state;
pub mod subset;

pub use candidates::{build_candidates, MatchCandidate};
pub use classify::{classify_round, Bucket};
pub use courts::{assign_courts, RoundPick};
pub use engine::solve_attempt;
pub use pairs::{build_pairs, Pair, PairCategory};
pub use state::AttemptState;
pub use subset::{select_disjoint, CANDIDATE_PREFIX_CAP};
