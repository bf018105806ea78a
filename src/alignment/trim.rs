use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::alignment::tracks::{AlignmentTracks, ANNOTATION_BREAK};
use crate::types::{Segment, SegmentTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimMode {
    None,
    /// Trim only the leading and trailing equal runs.
    EndsOnly,
    #[default]
    All,
}

impl TrimMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::EndsOnly => "ends_only",
            Self::All => "all",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CutKind {
    Head,
    Interior,
    Tail,
}

/// An equal run to collapse. `run` is in untrimmed track coordinates, which
/// coincide with the synthetic position counter.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Cut {
    kind: CutKind,
    run: Range<usize>,
}

impl Cut {
    fn annotation(&self, keep: usize) -> String {
        let pos = self.run.end;
        let start = pos - self.run.len() + keep;
        let end = pos - keep;
        match self.kind {
            CutKind::Head => format!("{end}>"),
            CutKind::Interior => format!("<{start}{ANNOTATION_BREAK}{end}>"),
            CutKind::Tail => format!("<{start}"),
        }
    }

    fn kept_head(&self, keep: usize) -> Option<Range<usize>> {
        match self.kind {
            CutKind::Head => None,
            CutKind::Interior | CutKind::Tail => Some(self.run.start..self.run.start + keep),
        }
    }

    fn kept_tail(&self, keep: usize) -> Option<Range<usize>> {
        match self.kind {
            CutKind::Tail => None,
            CutKind::Head | CutKind::Interior => Some(self.run.end - keep..self.run.end),
        }
    }
}

/// Collapse long equal runs of freshly built `tracks` into previews plus an
/// offset annotation. Runs of at most `2 * keep + 1` characters are kept whole.
///
/// `tracks` must be the untrimmed result of building `segments`.
pub fn trim(
    tracks: &AlignmentTracks,
    segments: &[Segment],
    mode: TrimMode,
    keep: usize,
) -> AlignmentTracks {
    if mode == TrimMode::None {
        return tracks.clone();
    }
    if !tracks.annotations.is_empty() || tracks.len() != tracks.position {
        tracing::warn!(
            track_len = tracks.len(),
            position = tracks.position,
            "trim: tracks are not an untrimmed build of the segments; leaving them unchanged"
        );
        return tracks.clone();
    }

    let cuts = plan_cuts(segments, mode, keep);
    tracing::debug!(
        mode = mode.as_str(),
        keep,
        cuts = cuts.len(),
        "trim: collapsing equal runs"
    );
    apply_cuts(tracks, &cuts, keep)
}

fn plan_cuts(segments: &[Segment], mode: TrimMode, keep: usize) -> Vec<Cut> {
    let threshold = keep.saturating_mul(2).saturating_add(1);
    let mut cuts = Vec::new();
    let mut position = 0usize;
    let mut equal_run = 0usize;
    let mut seen_change = false;

    let close_run = |kind: CutKind, run_len: usize, end: usize, cuts: &mut Vec<Cut>| {
        if run_len > threshold {
            cuts.push(Cut {
                kind,
                run: end - run_len..end,
            });
        }
    };

    for segment in segments {
        let width = segment.width();
        if segment.tag == SegmentTag::Equal {
            equal_run += width;
            position += width;
            continue;
        }

        if equal_run > 0 {
            if !seen_change {
                close_run(CutKind::Head, equal_run, position, &mut cuts);
            } else if mode == TrimMode::All {
                close_run(CutKind::Interior, equal_run, position, &mut cuts);
            }
            equal_run = 0;
        }
        seen_change = true;
        position += width;
    }

    if equal_run > 0 {
        close_run(CutKind::Tail, equal_run, position, &mut cuts);
    }
    cuts
}

fn apply_cuts(tracks: &AlignmentTracks, cuts: &[Cut], keep: usize) -> AlignmentTracks {
    let [source, target, marker] = tracks.tracks();
    let mut out = [Vec::new(), Vec::new(), Vec::new()];
    let mut annotations = Vec::with_capacity(cuts.len());
    let mut cursor = 0usize;

    for cut in cuts {
        let annotation: Vec<char> = cut.annotation(keep).chars().collect();
        for (dst, src) in out.iter_mut().zip([source, target, marker]) {
            dst.extend_from_slice(&src[cursor..cut.run.start]);
            if let Some(head) = cut.kept_head(keep) {
                dst.extend_from_slice(&src[head]);
            }
        }

        let annotation_start = out[0].len();
        for (dst, src) in out.iter_mut().zip([source, target, marker]) {
            dst.extend_from_slice(&annotation);
            if let Some(tail) = cut.kept_tail(keep) {
                dst.extend_from_slice(&src[tail]);
            }
        }
        annotations.push(annotation_start..annotation_start + annotation.len());
        cursor = cut.run.end;
    }

    for (dst, src) in out.iter_mut().zip([source, target, marker]) {
        dst.extend_from_slice(&src[cursor..]);
    }

    let [source, target, marker] = out;
    AlignmentTracks {
        source,
        target,
        marker,
        position: tracks.position,
        annotations,
    }
}
