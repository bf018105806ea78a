use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("{context}: step budget of {budget} exhausted")]
    BudgetExceeded { context: &'static str, budget: u64 },
    #[error("unknown segment tag {tag:?}")]
    UnknownTag { tag: String },
}

impl DiffError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn budget_exceeded(context: &'static str, budget: u64) -> Self {
        Self::BudgetExceeded { context, budget }
    }

    pub(crate) fn unknown_tag(tag: impl Into<String>) -> Self {
        Self::UnknownTag { tag: tag.into() }
    }
}
