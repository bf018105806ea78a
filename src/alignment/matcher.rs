use std::collections::{HashMap, HashSet};
use std::ops::Range;

use crate::error::DiffError;
use crate::pipeline::traits::{BlockMatcher, JunkPredicate};
use crate::types::{MatchOutcome, MatchingBlock, Segment, SegmentTag};

/// Both inputs plus a position index over `b`, built once per comparison.
///
/// Junk characters of `b` are left out of the index so they can never anchor a
/// block; they may still be absorbed when a block is extended.
pub struct IndexedPair<'s> {
    a: &'s [char],
    b: &'s [char],
    b_positions: HashMap<char, Vec<usize>>,
    b_junk: HashSet<char>,
}

impl<'s> IndexedPair<'s> {
    pub fn new(a: &'s [char], b: &'s [char], junk: &dyn JunkPredicate) -> Self {
        let mut b_positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b_positions.entry(c).or_default().push(j);
        }

        let b_junk: HashSet<char> = b_positions
            .keys()
            .copied()
            .filter(|&c| junk.is_junk(c))
            .collect();
        for c in &b_junk {
            b_positions.remove(c);
        }

        Self {
            a,
            b,
            b_positions,
            b_junk,
        }
    }

    pub fn a(&self) -> &'s [char] {
        self.a
    }

    pub fn b(&self) -> &'s [char] {
        self.b
    }

    /// Ascending positions of `c` in `b`; empty for junk or absent characters.
    pub fn positions_in_b(&self, c: char) -> &[usize] {
        self.b_positions.get(&c).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_b_junk(&self, c: char) -> bool {
        self.b_junk.contains(&c)
    }
}

/// Counts inner-loop steps of the longest-block search against an optional cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepBudget {
    limit: Option<u64>,
    used: u64,
}

impl StepBudget {
    pub fn new(limit: Option<u64>) -> Self {
        Self { limit, used: 0 }
    }

    pub fn unlimited() -> Self {
        Self::new(None)
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    pub fn charge(&mut self, steps: u64) -> Result<(), DiffError> {
        self.used = self.used.saturating_add(steps);
        match self.limit {
            Some(limit) if self.used > limit => {
                Err(DiffError::budget_exceeded("longest block search", limit))
            }
            _ => Ok(()),
        }
    }
}

/// Compute the edit script and similarity ratio of `a` against `b`.
pub fn match_sequences(
    a: &[char],
    b: &[char],
    junk: &dyn JunkPredicate,
    matcher: &dyn BlockMatcher,
    budget: &mut StepBudget,
) -> Result<MatchOutcome, DiffError> {
    let pair = IndexedPair::new(a, b, junk);
    let blocks = matching_blocks(&pair, matcher, budget)?;
    let segments = segments_from_blocks(&blocks, a.len(), b.len());
    let ratio = similarity_ratio(&segments, a.len(), b.len());

    tracing::debug!(
        len_a = a.len(),
        len_b = b.len(),
        blocks = blocks.len(),
        segments = segments.len(),
        steps = budget.used(),
        ratio,
        "matcher: computed edit script"
    );

    Ok(MatchOutcome { ratio, segments })
}

/// Recursively collect matching blocks, sorted and with adjacent blocks merged.
pub fn matching_blocks(
    pair: &IndexedPair<'_>,
    matcher: &dyn BlockMatcher,
    budget: &mut StepBudget,
) -> Result<Vec<MatchingBlock>, DiffError> {
    let mut pending: Vec<(Range<usize>, Range<usize>)> = vec![(0..pair.a().len(), 0..pair.b().len())];
    let mut found = Vec::new();

    while let Some((a_range, b_range)) = pending.pop() {
        let block = matcher.longest_block(pair, a_range.clone(), b_range.clone(), budget)?;
        if block.len == 0 {
            continue;
        }
        found.push(block);

        if a_range.start < block.a_start && b_range.start < block.b_start {
            pending.push((a_range.start..block.a_start, b_range.start..block.b_start));
        }
        let a_end = block.a_start + block.len;
        let b_end = block.b_start + block.len;
        if a_end < a_range.end && b_end < b_range.end {
            pending.push((a_end..a_range.end, b_end..b_range.end));
        }
    }

    found.sort_unstable();
    Ok(merge_adjacent(found))
}

fn merge_adjacent(blocks: Vec<MatchingBlock>) -> Vec<MatchingBlock> {
    let mut merged: Vec<MatchingBlock> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match merged.last_mut() {
            Some(last)
                if last.a_start + last.len == block.a_start
                    && last.b_start + last.len == block.b_start =>
            {
                last.len += block.len;
            }
            _ => merged.push(block),
        }
    }
    merged
}

/// Turn sorted, non-adjacent blocks into segments covering both inputs.
pub fn segments_from_blocks(blocks: &[MatchingBlock], len_a: usize, len_b: usize) -> Vec<Segment> {
    let sentinel = MatchingBlock {
        a_start: len_a,
        b_start: len_b,
        len: 0,
    };

    let mut segments = Vec::with_capacity(blocks.len() * 2 + 1);
    let (mut i, mut j) = (0usize, 0usize);
    for block in blocks.iter().chain(std::iter::once(&sentinel)) {
        let tag = match (i < block.a_start, j < block.b_start) {
            (true, true) => Some(SegmentTag::Replace),
            (true, false) => Some(SegmentTag::Delete),
            (false, true) => Some(SegmentTag::Insert),
            (false, false) => None,
        };
        if let Some(tag) = tag {
            segments.push(Segment::new(tag, i..block.a_start, j..block.b_start));
        }

        i = block.a_start + block.len;
        j = block.b_start + block.len;
        if block.len > 0 {
            segments.push(Segment::new(
                SegmentTag::Equal,
                block.a_start..i,
                block.b_start..j,
            ));
        }
    }
    segments
}

pub fn similarity_ratio(segments: &[Segment], len_a: usize, len_b: usize) -> f64 {
    let total = len_a + len_b;
    if total == 0 {
        return 1.0;
    }
    let matched: usize = segments
        .iter()
        .filter(|segment| segment.tag == SegmentTag::Equal)
        .map(Segment::len_a)
        .sum();
    2.0 * matched as f64 / total as f64
}
