use std::ops::Range;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DiffError;

/// Closed set of edit kinds produced by the match engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentTag {
    Equal,
    Delete,
    Insert,
    Replace,
}

impl SegmentTag {
    pub const ALL: [Self; 4] = [Self::Equal, Self::Delete, Self::Insert, Self::Replace];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Delete => "delete",
            Self::Insert => "insert",
            Self::Replace => "replace",
        }
    }

    /// Character drawn on the marker track for this tag.
    pub fn marker(self) -> char {
        match self {
            Self::Equal => ' ',
            Self::Delete => '-',
            Self::Insert => '+',
            Self::Replace => '^',
        }
    }
}

impl FromStr for SegmentTag {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| DiffError::unknown_tag(s))
    }
}

/// One span of the edit script. `a` and `b` index into the two inputs (in chars).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub tag: SegmentTag,
    pub a: Range<usize>,
    pub b: Range<usize>,
}

impl Segment {
    pub fn new(tag: SegmentTag, a: Range<usize>, b: Range<usize>) -> Self {
        Self { tag, a, b }
    }

    pub fn len_a(&self) -> usize {
        self.a.len()
    }

    pub fn len_b(&self) -> usize {
        self.b.len()
    }

    /// Width of the segment on the rendered tracks, `max(len_a, len_b)`.
    pub fn width(&self) -> usize {
        self.len_a().max(self.len_b())
    }
}

/// A common contiguous block: `a[a_start..a_start + len] == b[b_start..b_start + len]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchOutcome {
    /// `2*M / (len_a + len_b)`, or 1.0 when both inputs are empty.
    pub ratio: f64,
    pub segments: Vec<Segment>,
}
