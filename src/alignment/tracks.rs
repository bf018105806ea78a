use std::ops::Range;

use crate::types::{Segment, SegmentTag};

/// Splits an offset annotation into its start and end halves.
pub const ANNOTATION_BREAK: char = '\0';

/// Source, target and marker tracks, kept the same length after every step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlignmentTracks {
    pub(crate) source: Vec<char>,
    pub(crate) target: Vec<char>,
    pub(crate) marker: Vec<char>,
    /// Synthetic coordinate: sum of `max(len_a, len_b)` over pushed segments.
    pub(crate) position: usize,
    /// Char ranges of embedded offset annotations, ascending and disjoint.
    pub(crate) annotations: Vec<Range<usize>>,
}

impl AlignmentTracks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one segment of the edit script of `a` against `b`.
    pub fn push(&mut self, a: &[char], b: &[char], segment: &Segment) {
        let width = segment.width();
        let marker = segment.tag.marker();
        match segment.tag {
            SegmentTag::Equal => {
                let shared = &a[segment.a.clone()];
                self.source.extend_from_slice(shared);
                self.target.extend_from_slice(shared);
                self.marker.extend(std::iter::repeat(marker).take(width));
            }
            SegmentTag::Delete => {
                self.source.extend_from_slice(&a[segment.a.clone()]);
                self.target.extend(std::iter::repeat(' ').take(width));
                self.marker.extend(std::iter::repeat(marker).take(width));
            }
            SegmentTag::Insert => {
                self.source.extend(std::iter::repeat(' ').take(width));
                self.target.extend_from_slice(&b[segment.b.clone()]);
                self.marker.extend(std::iter::repeat(marker).take(width));
            }
            SegmentTag::Replace => {
                push_centered(&mut self.source, &a[segment.a.clone()], width);
                push_centered(&mut self.target, &b[segment.b.clone()], width);
                self.marker.extend(std::iter::repeat(marker).take(width));
            }
        }
        self.position += width;

        debug_assert!(
            self.source.len() == self.target.len() && self.target.len() == self.marker.len(),
            "alignment tracks diverged in length"
        );
    }

    pub fn len(&self) -> usize {
        self.marker.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marker.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn annotations(&self) -> &[Range<usize>] {
        &self.annotations
    }

    pub fn source(&self) -> String {
        self.source.iter().collect()
    }

    pub fn target(&self) -> String {
        self.target.iter().collect()
    }

    pub fn marker(&self) -> String {
        self.marker.iter().collect()
    }

    pub(crate) fn tracks(&self) -> [&[char]; 3] {
        [&self.source, &self.target, &self.marker]
    }
}

pub fn build_tracks(a: &[char], b: &[char], segments: &[Segment]) -> AlignmentTracks {
    let mut tracks = AlignmentTracks::new();
    for segment in segments {
        tracks.push(a, b, segment);
    }
    tracing::debug!(
        segments = segments.len(),
        track_len = tracks.len(),
        position = tracks.position,
        "tracks: built alignment"
    );
    tracks
}

/// Pad `text` with spaces to `width`; an odd leftover space goes on the left.
fn push_centered(track: &mut Vec<char>, text: &[char], width: usize) {
    let pad = width.saturating_sub(text.len());
    let right = pad / 2;
    let left = pad - right;
    track.extend(std::iter::repeat(' ').take(left));
    track.extend_from_slice(text);
    track.extend(std::iter::repeat(' ').take(right));
}
