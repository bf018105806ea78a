use rayon::prelude::*;

use crate::alignment::matcher::{match_sequences, StepBudget};
use crate::alignment::report::ComparisonResult;
use crate::alignment::tracks::{build_tracks, AlignmentTracks};
use crate::alignment::trim::trim;
use crate::alignment::wrap::render_diff;
use crate::config::DiffConfig;
use crate::error::DiffError;
use crate::pipeline::defaults::{junk_predicate, LongestBlockMatcher, NoJunk};
use crate::pipeline::traits::{BlockMatcher, JunkPredicate};
use crate::types::Segment;

/// Everything one comparison produced. Built fresh per call.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffOutcome {
    pub score: f64,
    pub segments: Vec<Segment>,
    /// Tracks after trimming.
    pub tracks: AlignmentTracks,
    pub diff: String,
}

pub struct CharDiffer {
    config: DiffConfig,
    junk: Box<dyn JunkPredicate>,
    matcher: Box<dyn BlockMatcher>,
}

pub(crate) struct CharDifferParts {
    pub config: DiffConfig,
    pub junk: Box<dyn JunkPredicate>,
    pub matcher: Box<dyn BlockMatcher>,
}

impl CharDiffer {
    pub(crate) fn from_parts(parts: CharDifferParts) -> Self {
        Self {
            config: parts.config,
            junk: parts.junk,
            matcher: parts.matcher,
        }
    }

    /// Default settings without input or step limits. Repetitive inputs can
    /// take quadratic time here; prefer [`CharDiffer::default`] for untrusted text.
    pub fn unbounded() -> Self {
        Self::from_parts(CharDifferParts {
            config: DiffConfig {
                max_input_chars: None,
                step_budget: None,
                ..DiffConfig::default()
            },
            junk: Box::new(NoJunk),
            matcher: Box::new(LongestBlockMatcher),
        })
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    pub fn compare(&self, source: &str, target: &str) -> Result<DiffOutcome, DiffError> {
        let a: Vec<char> = source.chars().collect();
        let b: Vec<char> = target.chars().collect();
        self.check_input_len("source", a.len())?;
        self.check_input_len("target", b.len())?;

        let mut budget = StepBudget::new(self.config.step_budget);
        let matched = match_sequences(
            &a,
            &b,
            self.junk.as_ref(),
            self.matcher.as_ref(),
            &mut budget,
        )?;
        let built = build_tracks(&a, &b, &matched.segments);
        let tracks = trim(
            &built,
            &matched.segments,
            self.config.trim_mode,
            self.config.keep_width,
        );
        let diff = render_diff(matched.ratio, &tracks, self.config.wrap_width);

        Ok(DiffOutcome {
            score: matched.ratio,
            segments: matched.segments,
            tracks,
            diff,
        })
    }

    /// Similarity score and rendered diff text (empty for an exact match).
    pub fn diff(&self, source: &str, target: &str) -> Result<(f64, String), DiffError> {
        self.compare(source, target)
            .map(|outcome| (outcome.score, outcome.diff))
    }

    /// Compare `output` against each candidate truth and keep the best result.
    ///
    /// An identical truth short-circuits as an exact match. A candidate that
    /// fails (oversized input, exhausted budget) is skipped with a warning;
    /// if every candidate fails the result is "not attempted".
    pub fn compare_candidates<S: AsRef<str>>(&self, output: &str, truths: &[S]) -> ComparisonResult {
        let mut results = Vec::with_capacity(truths.len());
        for (index, truth) in truths.iter().enumerate() {
            let truth = truth.as_ref();
            if truth == output {
                tracing::debug!(candidate = index, "compare: exact match");
                return ComparisonResult::exact(truth);
            }
            match self.diff(truth, output) {
                Ok((score, diff)) => results.push(ComparisonResult::new(score, diff, truth)),
                Err(err) => {
                    tracing::warn!(candidate = index, error = %err, "compare: skipping candidate truth");
                }
            }
        }

        let best = ComparisonResult::best_of(results);
        tracing::debug!(
            candidates = truths.len(),
            score = best.score,
            verdict = best.verdict().reason(),
            "compare: selected best candidate"
        );
        best
    }

    /// Run independent comparisons on the rayon pool; results keep input order.
    pub fn compare_batch<A, B>(&self, pairs: &[(A, B)]) -> Vec<Result<(f64, String), DiffError>>
    where
        A: AsRef<str> + Sync,
        B: AsRef<str> + Sync,
    {
        pairs
            .par_iter()
            .map(|(source, target)| self.diff(source.as_ref(), target.as_ref()))
            .collect()
    }

    fn check_input_len(&self, side: &'static str, len: usize) -> Result<(), DiffError> {
        match self.config.max_input_chars {
            Some(max) if len > max => {
                tracing::warn!(side, len, max, "compare: input exceeds max_input_chars");
                Err(DiffError::invalid_input(format!(
                    "{side} has {len} chars, limit is {max}"
                )))
            }
            _ => Ok(()),
        }
    }
}

impl Default for CharDiffer {
    fn default() -> Self {
        let config = DiffConfig::default();
        Self::from_parts(CharDifferParts {
            junk: junk_predicate(config.junk),
            config,
            matcher: Box::new(LongestBlockMatcher),
        })
    }
}
