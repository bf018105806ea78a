use std::fmt;

use serde::Serialize;

/// Above this score a mismatch is close enough for its diff to be worth reading.
pub const DIFF_REPORT_THRESHOLD: f64 = 0.7;
pub const EXACT_MATCH_TEXT: &str = "Operands match";
pub const NOT_ATTEMPTED_TEXT: &str = "(not attempted)";
pub const NOT_USED_TEXT: &str = "(not used)";

/// Outcome of comparing one produced output against one candidate truth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// `-1` until set, NaN when no comparison was made, otherwise in `[0, 1]`.
    pub score: f64,
    pub diff: String,
    pub truth: String,
}

impl ComparisonResult {
    pub const UNSET_SCORE: f64 = -1.0;

    pub fn new(score: f64, diff: impl Into<String>, truth: impl Into<String>) -> Self {
        Self {
            score,
            diff: diff.into(),
            truth: truth.into(),
        }
    }

    pub fn exact(truth: impl Into<String>) -> Self {
        Self::new(1.0, String::new(), truth)
    }

    pub fn not_attempted() -> Self {
        Self::new(f64::NAN, NOT_ATTEMPTED_TEXT, NOT_USED_TEXT)
    }

    pub fn is_exact(&self) -> bool {
        self.score == 1.0
    }

    pub fn is_attempted(&self) -> bool {
        !self.score.is_nan()
    }

    pub fn verdict(&self) -> MatchVerdict {
        MatchVerdict::classify(self.score)
    }

    /// The highest-scoring result; earlier results win ties and NaN never beats
    /// a real score. An empty input yields [`ComparisonResult::not_attempted`].
    pub fn best_of(results: impl IntoIterator<Item = Self>) -> Self {
        results
            .into_iter()
            .fold(None::<Self>, |best, candidate| match best {
                Some(best) if !candidate.outranks(&best) => Some(best),
                _ => Some(candidate),
            })
            .unwrap_or_else(Self::not_attempted)
    }

    fn outranks(&self, other: &Self) -> bool {
        if other.score.is_nan() {
            !self.score.is_nan()
        } else {
            self.score > other.score
        }
    }
}

impl Default for ComparisonResult {
    fn default() -> Self {
        Self::new(Self::UNSET_SCORE, String::new(), String::new())
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exact() {
            f.write_str(EXACT_MATCH_TEXT)
        } else if !self.is_attempted() {
            f.write_str(NOT_ATTEMPTED_TEXT)
        } else if self.score > DIFF_REPORT_THRESHOLD {
            write!(f, "Similarity:{:?}\n{}", self.score, self.diff)
        } else {
            write!(f, "Similarity:{:?}", self.score)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchVerdict {
    Exact,
    GoodEffort,
    Terrible,
    NotAttempted,
}

impl MatchVerdict {
    pub fn classify(score: f64) -> Self {
        if score.is_nan() {
            Self::NotAttempted
        } else if score == 1.0 {
            Self::Exact
        } else if score > DIFF_REPORT_THRESHOLD {
            Self::GoodEffort
        } else {
            Self::Terrible
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Exact => "✅",
            Self::GoodEffort => "❌",
            Self::Terrible => "💣",
            Self::NotAttempted => "❔",
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Self::Exact => "Exact Match",
            Self::GoodEffort => "(good effort)",
            Self::Terrible => "(terrible)",
            Self::NotAttempted => NOT_ATTEMPTED_TEXT,
        }
    }
}
