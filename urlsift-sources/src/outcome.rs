/// What one source produced for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success { source: String, urls: Vec<String> },
    Failure { source: String, reason: String },
}

impl FetchOutcome {
    pub fn success(source: impl Into<String>, urls: Vec<String>) -> Self {
        Self::Success {
            source: source.into(),
            urls,
        }
    }

    pub fn failure(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failure {
            source: source.into(),
            reason: reason.into(),
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Self::Success { source, .. } | Self::Failure { source, .. } => source,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// URLs from a successful fetch; failures contribute nothing.
    pub fn urls(&self) -> &[String] {
        match self {
            Self::Success { urls, .. } => urls,
            Self::Failure { .. } => &[],
        }
    }
}
