pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use alignment::matcher::{match_sequences, IndexedPair, StepBudget};
pub use alignment::report::{ComparisonResult, MatchVerdict, DIFF_REPORT_THRESHOLD};
pub use alignment::tracks::{build_tracks, AlignmentTracks, ANNOTATION_BREAK};
pub use alignment::trim::{trim, TrimMode};
pub use alignment::wrap::{render_diff, wrap, WrappedTracks};
pub use config::{DiffConfig, JunkKind};
pub use error::DiffError;
pub use pipeline::builder::CharDifferBuilder;
pub use pipeline::runtime::{CharDiffer, DiffOutcome};
pub use pipeline::traits::{BlockMatcher, JunkPredicate};
pub use types::{MatchOutcome, MatchingBlock, Segment, SegmentTag};

/// Score and diff text of `source` against `target` with default settings.
///
/// Never fails: a comparison that cannot be made (oversized input, exhausted
/// step budget) scores NaN ("not attempted").
pub fn diff(source: &str, target: &str) -> (f64, String) {
    CharDiffer::default()
        .diff(source, target)
        .unwrap_or_else(|err| {
            tracing::error!(error = %err, "diff: comparison failed");
            (f64::NAN, String::new())
        })
}
