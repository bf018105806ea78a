use chardiff_rs::{
    CharDiffer, CharDifferBuilder, DiffConfig, DiffOutcome, SegmentTag, TrimMode,
};
use proptest::prelude::*;
use proptest::sample::Index;

const KEEP: usize = DiffConfig::DEFAULT_KEEP_WIDTH;

fn untrimmed() -> CharDiffer {
    CharDifferBuilder::new(DiffConfig {
        max_input_chars: None,
        ..DiffConfig::default()
    })
    .with_trim_mode(TrimMode::None)
    .build()
    .expect("default config builds")
}

fn wrapping_at(width: usize) -> CharDiffer {
    CharDifferBuilder::new(DiffConfig {
        wrap_width: width,
        max_input_chars: None,
        ..DiffConfig::default()
    })
    .build()
    .expect("default config builds")
}

/// A long base string with a handful of point edits, so the alignment has
/// long equal runs between changes.
fn base_and_edited() -> impl Strategy<Value = (String, String)> {
    (
        "[a-d]{20,160}",
        prop::collection::vec((any::<Index>(), "[w-z]"), 1..5),
    )
        .prop_map(|(base, edits)| {
            let mut edited: Vec<char> = base.chars().collect();
            for (index, replacement) in edits {
                let at = index.index(edited.len());
                edited.splice(at..=at, replacement.chars());
            }
            (base, edited.into_iter().collect())
        })
}

fn annotation_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in line.chars() {
        if c.is_ascii_digit() || c == '<' || c == '>' {
            current.push(c);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn longest_space_run(track: &str) -> usize {
    track
        .split(|c| c != ' ')
        .map(|run| run.len())
        .max()
        .unwrap_or(0)
}

proptest! {
    #[test]
    fn identical_inputs_score_one_with_empty_diff(s in "\\PC{0,80}") {
        let (score, diff) = chardiff_rs::diff(&s, &s);
        prop_assert_eq!(score, 1.0);
        prop_assert_eq!(diff, "");
    }

    #[test]
    fn score_is_bounded_and_exact_only_for_equal_inputs(a in "[a-e ]{0,40}", b in "[a-e ]{0,40}") {
        let (score, diff) = chardiff_rs::diff(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
        prop_assert_eq!(score == 1.0, a == b);
        prop_assert_eq!(diff.is_empty(), a == b);
    }

    #[test]
    fn segments_reconstruct_both_inputs(a in "[a-e]{0,40}", b in "[a-e]{0,40}") {
        let outcome = untrimmed().compare(&a, &b).unwrap();
        let a_chars: Vec<char> = a.chars().collect();
        let b_chars: Vec<char> = b.chars().collect();

        let mut next_a = 0;
        let mut next_b = 0;
        let mut rebuilt_a = String::new();
        let mut rebuilt_b = String::new();
        for segment in &outcome.segments {
            prop_assert_eq!(segment.a.start, next_a);
            prop_assert_eq!(segment.b.start, next_b);
            if segment.tag == SegmentTag::Equal {
                prop_assert_eq!(&a_chars[segment.a.clone()], &b_chars[segment.b.clone()]);
            }
            rebuilt_a.extend(&a_chars[segment.a.clone()]);
            rebuilt_b.extend(&b_chars[segment.b.clone()]);
            next_a = segment.a.end;
            next_b = segment.b.end;
        }
        prop_assert_eq!(rebuilt_a, a);
        prop_assert_eq!(rebuilt_b, b);
    }

    #[test]
    fn untrimmed_tracks_are_aligned(a in "[a-e]{0,40}", b in "[a-e]{0,40}") {
        let DiffOutcome { segments, tracks, .. } = untrimmed().compare(&a, &b).unwrap();
        let width: usize = segments.iter().map(|segment| segment.width()).sum();

        prop_assert_eq!(tracks.source().chars().count(), tracks.len());
        prop_assert_eq!(tracks.target().chars().count(), tracks.len());
        prop_assert_eq!(tracks.len(), width);
        prop_assert_eq!(tracks.position(), width);
        prop_assert_eq!(tracks.source().replace(' ', ""), a);
        prop_assert_eq!(tracks.target().replace(' ', ""), b);
    }

    #[test]
    fn disjoint_alphabets_score_symmetrically(a in "[a-e]{0,30}", b in "[v-z]{0,30}") {
        let (forward, _) = chardiff_rs::diff(&a, &b);
        let (backward, _) = chardiff_rs::diff(&b, &a);
        prop_assert_eq!(forward, backward);
        let expected = if a.is_empty() && b.is_empty() { 1.0 } else { 0.0 };
        prop_assert_eq!(forward, expected);
    }

    #[test]
    fn empty_side_scores_symmetrically(s in "\\PC{0,60}") {
        let (forward, _) = chardiff_rs::diff(&s, "");
        let (backward, _) = chardiff_rs::diff("", &s);
        prop_assert_eq!(forward, backward);
        let expected = if s.is_empty() { 1.0 } else { 0.0 };
        prop_assert_eq!(forward, expected);
    }

    #[test]
    fn identical_inputs_score_symmetrically(s in "[a-e ]{0,60}") {
        let differ = untrimmed();
        let forward = differ.compare(&s, &s).unwrap();
        let backward = differ.compare(&s, &s).unwrap();
        prop_assert_eq!(forward.score, backward.score);
        prop_assert_eq!(forward.score, 1.0);
        prop_assert!(forward.segments.iter().all(|segment| segment.tag == SegmentTag::Equal));
    }

    #[test]
    fn nul_in_inputs_keeps_groups_whole(
        a in "[abz]{0,40}".prop_map(|s| s.replace('z', "\0")),
        b in "[abz]{0,40}".prop_map(|s| s.replace('z', "\0")),
    ) {
        prop_assume!(a != b);
        let diff = untrimmed().compare(&a, &b).unwrap().diff;
        let source_lines: Vec<&str> = diff
            .lines()
            .filter_map(|line| line.strip_prefix("- "))
            .collect();
        prop_assert_eq!(source_lines.len(), 1);
        prop_assert_eq!(
            source_lines[0].matches('\0').count(),
            a.matches('\0').count()
        );
        prop_assert_eq!(diff.trim_end_matches('\n').lines().count(), 3);
    }

    #[test]
    fn trimmed_tracks_stay_aligned_and_bound_equal_runs((a, b) in base_and_edited()) {
        let outcome = CharDiffer::unbounded().compare(&a, &b).unwrap();
        let tracks = &outcome.tracks;

        prop_assert_eq!(tracks.source().chars().count(), tracks.len());
        prop_assert_eq!(tracks.target().chars().count(), tracks.len());
        prop_assert_eq!(tracks.marker().chars().count(), tracks.len());
        prop_assert!(longest_space_run(&tracks.marker()) <= 2 * KEEP + 1);
    }

    #[test]
    fn wrapping_never_splits_an_annotation((a, b) in base_and_edited(), width in 1usize..24) {
        let outcome = wrapping_at(width).compare(&a, &b).unwrap();
        let source: Vec<char> = outcome.tracks.source().chars().collect();

        let expected: Vec<String> = outcome
            .tracks
            .annotations()
            .iter()
            .flat_map(|range| {
                source[range.clone()]
                    .iter()
                    .collect::<String>()
                    .split('\0')
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        let observed: Vec<String> = outcome
            .diff
            .lines()
            .filter_map(|line| line.strip_prefix("- "))
            .flat_map(annotation_tokens)
            .collect();
        prop_assert_eq!(observed, expected);

        let groups: Vec<&str> = outcome.diff.split("\n\n").collect();
        for group in groups {
            prop_assert_eq!(group.trim_end_matches('\n').lines().count(), 3);
        }
    }
}
