use std::path::Path;

use serde::Deserialize;

use crate::alignment::trim::TrimMode;
use crate::error::DiffError;

/// Which characters the match engine may skip when anchoring a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JunkKind {
    #[default]
    None,
    Whitespace,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    pub keep_width: usize,
    pub wrap_width: usize,
    pub trim_mode: TrimMode,
    pub junk: JunkKind,
    /// Inputs longer than this (in chars) are rejected before matching.
    pub max_input_chars: Option<usize>,
    /// Upper bound on inner-loop steps of the longest-block search per comparison.
    pub step_budget: Option<u64>,
}

impl DiffConfig {
    pub const DEFAULT_KEEP_WIDTH: usize = 7;
    pub const DEFAULT_WRAP_WIDTH: usize = 118;
    pub const DEFAULT_MAX_INPUT_CHARS: usize = 200_000;
    /// Enough for a few thousand chars of ordinary text; highly repetitive
    /// inputs near `DEFAULT_MAX_INPUT_CHARS` exhaust it within seconds.
    pub const DEFAULT_STEP_BUDGET: u64 = 10_000_000;

    pub fn load(path: &Path) -> Result<Self, DiffError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| DiffError::io("read diff config", e))?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, DiffError> {
        serde_json::from_str(data).map_err(|e| DiffError::json("parse diff config", e))
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            keep_width: Self::DEFAULT_KEEP_WIDTH,
            wrap_width: Self::DEFAULT_WRAP_WIDTH,
            trim_mode: TrimMode::All,
            junk: JunkKind::None,
            max_input_chars: Some(Self::DEFAULT_MAX_INPUT_CHARS),
            step_budget: Some(Self::DEFAULT_STEP_BUDGET),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_config_default() {
        let config = DiffConfig::default();
        assert_eq!(config.keep_width, 7);
        assert_eq!(config.wrap_width, 118);
        assert_eq!(config.trim_mode, TrimMode::All);
        assert_eq!(config.junk, JunkKind::None);
        assert_eq!(
            config.max_input_chars,
            Some(DiffConfig::DEFAULT_MAX_INPUT_CHARS)
        );
        assert_eq!(config.step_budget, Some(DiffConfig::DEFAULT_STEP_BUDGET));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = DiffConfig::from_json(r#"{"keep_width": 3, "trim_mode": "ends_only"}"#)
            .expect("valid config json");
        assert_eq!(config.keep_width, 3);
        assert_eq!(config.trim_mode, TrimMode::EndsOnly);
        assert_eq!(config.wrap_width, DiffConfig::DEFAULT_WRAP_WIDTH);
    }

    #[test]
    fn json_accepts_null_limits_and_whitespace_junk() {
        let config = DiffConfig::from_json(
            r#"{"max_input_chars": null, "step_budget": 5000, "junk": "whitespace"}"#,
        )
        .expect("valid config json");
        assert!(config.max_input_chars.is_none());
        assert_eq!(config.step_budget, Some(5000));

        let unlimited = DiffConfig::from_json(r#"{"step_budget": null}"#).expect("valid config json");
        assert!(unlimited.step_budget.is_none());
        assert_eq!(config.junk, JunkKind::Whitespace);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = DiffConfig::from_json(r#"{"keepwidth": 3}"#).unwrap_err();
        assert!(matches!(err, DiffError::Json { .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = DiffConfig::load(Path::new("/nonexistent/chardiff.json")).unwrap_err();
        assert!(matches!(err, DiffError::Io { .. }));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join("chardiff_rs_config_load.json");
        std::fs::write(&path, r#"{"wrap_width": 40}"#).expect("write config");
        let config = DiffConfig::load(&path).expect("config should load");
        assert_eq!(config.wrap_width, 40);
        let _ = std::fs::remove_file(&path);
    }
}
