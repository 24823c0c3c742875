//! Disjoint subset selection.
//!
//! Given an ordered candidate list, finds the largest subset of matches
//! whose players are pairwise disjoint, capped at the number of courts
//! still open this round.
//!
//! # Algorithm
//!
//! Depth-first branch and bound over a bounded prefix of the candidate
//! list, two branches per candidate (include if compatible, then skip).
//! Implemented iteratively with an explicit frame stack and per-candidate
//! player bitmasks instead of recursion and set copies. A branch is cut
//! when the target size is reached or when the remaining candidates cannot
//! beat the best subset found (`chosen + remaining <= best`).
//!
//! Ties between equal-size subsets go to the first one found in input
//! order, so the classifier's priority sort carries through selection.

use super::candidates::MatchCandidate;

/// Candidates considered per selection; the rest of the list is ignored
/// for tractability.
pub const CANDIDATE_PREFIX_CAP: usize = 200;

/// Player-occupancy bitmask over roster indices.
pub fn player_mask(candidate: &MatchCandidate, blocks: usize) -> Vec<u64> {
    let mut mask = vec![0u64; blocks];
    for i in candidate.members() {
        mask[i / 64] |= 1 << (i % 64);
    }
    mask
}

/// Number of `u64` blocks needed for a roster of the given size.
#[inline]
pub fn mask_blocks(roster_len: usize) -> usize {
    roster_len.div_ceil(64)
}

#[inline]
fn disjoint(used: &[u64], mask: &[u64]) -> bool {
    used.iter().zip(mask).all(|(u, m)| u & m == 0)
}

fn include(used: &mut [u64], mask: &[u64]) {
    for (u, m) in used.iter_mut().zip(mask) {
        *u |= m;
    }
}

fn exclude(used: &mut [u64], mask: &[u64]) {
    for (u, m) in used.iter_mut().zip(mask) {
        *u &= !m;
    }
}

#[derive(Clone, Copy)]
struct Frame {
    idx: usize,
    stage: u8,
    took: bool,
}

impl Frame {
    fn at(idx: usize) -> Self {
        Self {
            idx,
            stage: 0,
            took: false,
        }
    }
}

/// Selects up to `want` pairwise-disjoint candidates from the masked list.
///
/// Returns positions into `masks` (and therefore into the caller's
/// candidate ordering), largest feasible subset first found.
pub fn select_disjoint(masks: &[Vec<u64>], want: usize) -> Vec<usize> {
    if want == 0 || masks.is_empty() {
        return Vec::new();
    }
    let n = masks.len().min(CANDIDATE_PREFIX_CAP);
    let blocks = masks[0].len();

    let mut used = vec![0u64; blocks];
    let mut chosen: Vec<usize> = Vec::new();
    let mut best: Vec<usize> = Vec::new();
    let mut stack = vec![Frame::at(0)];

    while !stack.is_empty() {
        if best.len() >= want {
            break;
        }
        let top = stack.len() - 1;
        let Frame { idx: i, stage, took } = stack[top];
        match stage {
            0 => {
                // First visit: leaf and bound checks, then the include branch.
                if i >= n || chosen.len() == want {
                    if chosen.len() > best.len() {
                        best = chosen.clone();
                    }
                    stack.pop();
                    continue;
                }
                if chosen.len() + (n - i) <= best.len() {
                    stack.pop();
                    continue;
                }
                stack[top].stage = 1;
                if disjoint(&used, &masks[i]) {
                    stack[top].took = true;
                    include(&mut used, &masks[i]);
                    chosen.push(i);
                    stack.push(Frame::at(i + 1));
                }
            }
            1 => {
                // Include branch explored; undo it and try the skip branch.
                stack[top].stage = 2;
                if took {
                    chosen.pop();
                    exclude(&mut used, &masks[i]);
                }
                stack.push(Frame::at(i + 1));
            }
            _ => {
                stack.pop();
            }
        }
    }
    best
}
