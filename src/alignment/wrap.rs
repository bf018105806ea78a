use std::ops::Range;

use crate::alignment::tracks::{AlignmentTracks, ANNOTATION_BREAK};

pub const SOURCE_PREFIX: &str = "- ";
pub const TARGET_PREFIX: &str = "+ ";
pub const MARKER_PREFIX: &str = "? ";

/// Display lines per track. All three vectors have the same length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WrappedTracks {
    pub source: Vec<String>,
    pub target: Vec<String>,
    pub marker: Vec<String>,
}

impl WrappedTracks {
    pub fn len(&self) -> usize {
        self.marker.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marker.is_empty()
    }

    /// Interleave as source/target/marker groups, separated by a blank line.
    pub fn render(&self) -> String {
        self.source
            .iter()
            .zip(&self.target)
            .zip(&self.marker)
            .map(|((source, target), marker)| format!("{source}\n{target}\n{marker}\n"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn wrap(tracks: &AlignmentTracks, width: usize) -> WrappedTracks {
    let bounds = chunk_bounds(tracks.len(), width, tracks.annotations());
    let [source, target, marker] = tracks.tracks();
    let breaks = annotation_breaks(source, tracks.annotations());
    WrappedTracks {
        source: wrap_track(source, &bounds, &breaks, SOURCE_PREFIX),
        target: wrap_track(target, &bounds, &breaks, TARGET_PREFIX),
        marker: wrap_track(marker, &bounds, &breaks, MARKER_PREFIX),
    }
}

/// Wrapped diff text, or an empty string for an exact match.
pub fn render_diff(score: f64, tracks: &AlignmentTracks, width: usize) -> String {
    if score == 1.0 {
        return String::new();
    }
    let wrapped = wrap(tracks, width);
    tracing::debug!(
        width,
        lines = wrapped.len(),
        "wrap: rendered diff text"
    );
    wrapped.render()
}

/// Chunk `[0, len)` into pieces of at most `width` chars, never ending a piece
/// strictly inside an annotation. A piece that starts on an annotation longer
/// than `width` runs to the annotation's end.
fn chunk_bounds(len: usize, width: usize, annotations: &[Range<usize>]) -> Vec<Range<usize>> {
    let width = width.max(1);
    let mut bounds = Vec::with_capacity(len / width + 1);
    let mut start = 0usize;
    while start < len {
        let mut end = (start + width).min(len);
        if let Some(annotation) = annotations
            .iter()
            .find(|annotation| annotation.start < end && end < annotation.end)
        {
            end = if annotation.start > start {
                annotation.start
            } else {
                annotation.end
            };
        }
        bounds.push(start..end);
        start = end;
    }
    bounds
}

/// Positions of the break inside each annotation. A NUL from the inputs
/// themselves lies outside every annotation and is rendered as-is.
fn annotation_breaks(track: &[char], annotations: &[Range<usize>]) -> Vec<usize> {
    annotations
        .iter()
        .filter_map(|annotation| {
            track[annotation.clone()]
                .iter()
                .position(|&c| c == ANNOTATION_BREAK)
                .map(|offset| annotation.start + offset)
        })
        .collect()
}

fn wrap_track(
    track: &[char],
    bounds: &[Range<usize>],
    breaks: &[usize],
    prefix: &str,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(bounds.len() + breaks.len());
    for bound in bounds {
        let mut line = String::from(prefix);
        for (i, &c) in track[bound.clone()].iter().enumerate() {
            if breaks.binary_search(&(bound.start + i)).is_ok() {
                lines.push(std::mem::replace(&mut line, String::from(prefix)));
            } else {
                line.push(c);
            }
        }
        lines.push(line);
    }
    lines
}
