//! Pair building.
//!
//! Produces the universe of eligible partnerships for one scheduling
//! attempt. Pairs reference players by index into the active roster slice,
//! which keeps the downstream candidate masks cheap.
//!
//! Pairing is deterministic and driven by roster order; randomness enters
//! later when each attempt shuffles its copy of the pool.

use crate::models::{Gender, GenderRule, Player};

/// Gender shape of a pair, used to decide which pairs may meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairCategory {
    /// Both members men (or a single man in singles play).
    Men,
    /// Both members women (or a single woman in singles play).
    Women,
    /// One man and one woman (mixed doubles).
    Mixed,
}

impl PairCategory {
    /// Whether this category satisfies a round's target gender.
    pub fn matches_target(self, target: Gender) -> bool {
        match (self, target) {
            (PairCategory::Men, Gender::Male) => true,
            (PairCategory::Women, Gender::Female) => true,
            (PairCategory::Mixed, _) => true,
            _ => false,
        }
    }

    fn of(gender: Gender) -> Self {
        match gender {
            Gender::Male => PairCategory::Men,
            Gender::Female => PairCategory::Women,
        }
    }
}

/// Two players proposed as one team side.
///
/// In singles play a pair is a single distinct player (`second` is `None`)
/// and downstream match assembly treats it as width 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
    /// Roster index of the first member.
    pub first: usize,
    /// Roster index of the second member, `None` for a singles unit.
    pub second: Option<usize>,
    /// Gender shape of the pair.
    pub category: PairCategory,
}

impl Pair {
    fn team(first: usize, second: usize, category: PairCategory) -> Self {
        Self {
            first,
            second: Some(second),
            category,
        }
    }

    fn solo(index: usize, gender: Gender) -> Self {
        Self {
            first: index,
            second: None,
            category: PairCategory::of(gender),
        }
    }

    /// Member indices, in pair order.
    pub fn members(&self) -> impl Iterator<Item = usize> {
        [Some(self.first), self.second].into_iter().flatten()
    }

    /// Whether the pair contains the given roster index.
    pub fn contains(&self, index: usize) -> bool {
        self.first == index || self.second == Some(index)
    }

    /// Whether two pairs share no player.
    pub fn is_disjoint(&self, other: &Pair) -> bool {
        !other.members().any(|m| self.contains(m))
    }
}

/// Builds the pair pool for the given active roster and gender rule.
///
/// - Same-gender doubles: every unordered pair within the male subset and
///   within the female subset.
/// - Singles: every player as a width-1 unit.
/// - Mixed doubles: the i-th man with the i-th woman (roster order) for
///   `min(men, women)` pairs; the surplus gender pairs up among itself two
///   at a time, and a final odd player is left out of this pool.
pub fn build_pairs(players: &[Player], rule: GenderRule) -> Vec<Pair> {
    let men: Vec<usize> = indices_of(players, Gender::Male);
    let women: Vec<usize> = indices_of(players, Gender::Female);

    match rule {
        GenderRule::Doubles => {
            let mut pairs = all_pairs(&men, PairCategory::Men);
            pairs.extend(all_pairs(&women, PairCategory::Women));
            pairs
        }
        GenderRule::Singles => players
            .iter()
            .enumerate()
            .map(|(i, p)| Pair::solo(i, p.gender))
            .collect(),
        GenderRule::MixedDoubles => {
            let balanced = men.len().min(women.len());
            let mut pairs: Vec<Pair> = (0..balanced)
                .map(|i| Pair::team(men[i], women[i], PairCategory::Mixed))
                .collect();

            let (surplus, category) = if men.len() > women.len() {
                (&men[balanced..], PairCategory::Men)
            } else {
                (&women[balanced..], PairCategory::Women)
            };
            for two in surplus.chunks_exact(2) {
                pairs.push(Pair::team(two[0], two[1], category));
            }
            pairs
        }
    }
}

fn indices_of(players: &[Player], gender: Gender) -> Vec<usize> {
    players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.gender == gender)
        .map(|(i, _)| i)
        .collect()
}

fn all_pairs(indices: &[usize], category: PairCategory) -> Vec<Pair> {
    let mut pairs = Vec::new();
    for (i, &a) in indices.iter().enumerate() {
        for &b in &indices[i + 1..] {
            pairs.push(Pair::team(a, b, category));
        }
    }
    pairs
}
