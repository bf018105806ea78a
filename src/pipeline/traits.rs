use std::ops::Range;

use crate::alignment::matcher::{IndexedPair, StepBudget};
use crate::error::DiffError;
use crate::types::MatchingBlock;

pub trait JunkPredicate: Send + Sync {
    fn is_junk(&self, c: char) -> bool;
}

/// Finds the longest common contiguous block within `a[a_range]` and `b[b_range]`.
///
/// Implementations must return a zero-length block when nothing matches, and
/// must break ties by the lowest start in `a`, then in `b`, so that results
/// stay deterministic.
pub trait BlockMatcher: Send + Sync {
    fn longest_block(
        &self,
        pair: &IndexedPair<'_>,
        a_range: Range<usize>,
        b_range: Range<usize>,
        budget: &mut StepBudget,
    ) -> Result<MatchingBlock, DiffError>;
}
