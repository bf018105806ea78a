use crate::alignment::trim::TrimMode;
use crate::config::DiffConfig;
use crate::error::DiffError;
use crate::pipeline::defaults::{junk_predicate, LongestBlockMatcher};
use crate::pipeline::runtime::{CharDiffer, CharDifferParts};
use crate::pipeline::traits::{BlockMatcher, JunkPredicate};

pub struct CharDifferBuilder {
    config: DiffConfig,
    junk: Option<Box<dyn JunkPredicate>>,
    matcher: Option<Box<dyn BlockMatcher>>,
}

impl CharDifferBuilder {
    pub fn new(config: DiffConfig) -> Self {
        Self {
            config,
            junk: None,
            matcher: None,
        }
    }

    pub fn with_trim_mode(mut self, trim_mode: TrimMode) -> Self {
        self.config.trim_mode = trim_mode;
        self
    }

    /// Overrides the predicate selected by `DiffConfig::junk`.
    pub fn with_junk_predicate(mut self, junk: Box<dyn JunkPredicate>) -> Self {
        self.junk = Some(junk);
        self
    }

    pub fn with_block_matcher(mut self, matcher: Box<dyn BlockMatcher>) -> Self {
        self.matcher = Some(matcher);
        self
    }

    pub fn build(self) -> Result<CharDiffer, DiffError> {
        let mut config = self.config;
        if config.keep_width == 0 {
            return Err(DiffError::invalid_input("keep_width must be >= 1"));
        }
        if config.wrap_width == 0 {
            config.wrap_width = DiffConfig::DEFAULT_WRAP_WIDTH;
        }
        if config.step_budget == Some(0) {
            return Err(DiffError::invalid_input("step_budget must be >= 1"));
        }

        let junk = self
            .junk
            .unwrap_or_else(|| junk_predicate(config.junk));
        tracing::debug!(
            keep_width = config.keep_width,
            wrap_width = config.wrap_width,
            trim_mode = config.trim_mode.as_str(),
            max_input_chars = ?config.max_input_chars,
            step_budget = ?config.step_budget,
            "builder: char differ configured"
        );

        Ok(CharDiffer::from_parts(CharDifferParts {
            config,
            junk,
            matcher: self
                .matcher
                .unwrap_or_else(|| Box::new(LongestBlockMatcher)),
        }))
    }
}
