use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chardiff_rs::{ComparisonResult, DiffOutcome, MatchVerdict, Segment};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DiffDocument<'a> {
    pub score: f64,
    pub verdict: MatchVerdict,
    pub segments: &'a [Segment],
    pub source_track: String,
    pub target_track: String,
    pub marker_track: String,
    pub diff: &'a str,
}

impl<'a> DiffDocument<'a> {
    pub fn new(outcome: &'a DiffOutcome) -> Self {
        Self {
            score: outcome.score,
            verdict: MatchVerdict::classify(outcome.score),
            segments: &outcome.segments,
            source_track: outcome.tracks.source(),
            target_track: outcome.tracks.target(),
            marker_track: outcome.tracks.marker(),
            diff: &outcome.diff,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CandidateDocument<'a> {
    pub verdict: MatchVerdict,
    pub symbol: &'static str,
    pub reason: &'static str,
    pub rendered: String,
    pub result: &'a ComparisonResult,
}

impl<'a> CandidateDocument<'a> {
    pub fn new(result: &'a ComparisonResult) -> Self {
        let verdict = result.verdict();
        Self {
            verdict,
            symbol: verdict.symbol(),
            reason: verdict.reason(),
            rendered: result.to_string(),
            result,
        }
    }
}

pub fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create JSON output directory '{}': {err}",
                parent.display()
            )
        })?;
    }

    let mut file = File::create(path)
        .map_err(|err| format!("Failed to create JSON file '{}': {err}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, document).map_err(|err| {
        format!(
            "Failed to serialize JSON output '{}': {err}",
            path.display()
        )
    })?;
    file.write_all(b"\n")
        .map_err(|err| format!("Failed to finalize JSON file '{}': {err}", path.display()))?;
    Ok(())
}
