use std::collections::HashMap;
use std::ops::Range;

use crate::alignment::matcher::{IndexedPair, StepBudget};
use crate::config::JunkKind;
use crate::error::DiffError;
use crate::pipeline::traits::{BlockMatcher, JunkPredicate};
use crate::types::MatchingBlock;

pub struct NoJunk;

impl JunkPredicate for NoJunk {
    fn is_junk(&self, _c: char) -> bool {
        false
    }
}

pub struct WhitespaceJunk;

impl JunkPredicate for WhitespaceJunk {
    fn is_junk(&self, c: char) -> bool {
        c.is_whitespace()
    }
}

pub fn junk_predicate(kind: JunkKind) -> Box<dyn JunkPredicate> {
    match kind {
        JunkKind::None => Box::new(NoJunk),
        JunkKind::Whitespace => Box::new(WhitespaceJunk),
    }
}

/// Dynamic-programming longest common substring over the `b` position index.
///
/// `run_ending_at[j]` holds the length of the common run ending at `a[i-1]`
/// and `b[j]`; a strictly longer run is needed to replace the current best, so
/// the earliest block in `a` (then `b`) wins ties.
pub struct LongestBlockMatcher;

impl BlockMatcher for LongestBlockMatcher {
    fn longest_block(
        &self,
        pair: &IndexedPair<'_>,
        a_range: Range<usize>,
        b_range: Range<usize>,
        budget: &mut StepBudget,
    ) -> Result<MatchingBlock, DiffError> {
        let (a, b) = (pair.a(), pair.b());
        let mut best = MatchingBlock {
            a_start: a_range.start,
            b_start: b_range.start,
            len: 0,
        };

        let mut run_ending_at: HashMap<usize, usize> = HashMap::new();
        for i in a_range.clone() {
            let mut next_runs: HashMap<usize, usize> = HashMap::new();
            for &j in pair.positions_in_b(a[i]) {
                if j < b_range.start {
                    continue;
                }
                if j >= b_range.end {
                    break;
                }
                budget.charge(1)?;
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| run_ending_at.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_runs.insert(j, k);
                if k > best.len {
                    best = MatchingBlock {
                        a_start: i + 1 - k,
                        b_start: j + 1 - k,
                        len: k,
                    };
                }
            }
            run_ending_at = next_runs;
        }

        // Grow over equal non-junk neighbours first, then over equal junk.
        extend_block(pair, &mut best, &a_range, &b_range, false);
        extend_block(pair, &mut best, &a_range, &b_range, true);
        Ok(best)
    }
}

fn extend_block(
    pair: &IndexedPair<'_>,
    block: &mut MatchingBlock,
    a_range: &Range<usize>,
    b_range: &Range<usize>,
    junk: bool,
) {
    let (a, b) = (pair.a(), pair.b());
    while block.a_start > a_range.start
        && block.b_start > b_range.start
        && pair.is_b_junk(b[block.b_start - 1]) == junk
        && a[block.a_start - 1] == b[block.b_start - 1]
    {
        block.a_start -= 1;
        block.b_start -= 1;
        block.len += 1;
    }
    while block.a_start + block.len < a_range.end
        && block.b_start + block.len < b_range.end
        && pair.is_b_junk(b[block.b_start + block.len]) == junk
        && a[block.a_start + block.len] == b[block.b_start + block.len]
    {
        block.len += 1;
    }
}
