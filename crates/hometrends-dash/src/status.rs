/// Lifecycle of one scoped fetch (keyword list, chart, summaries, or a
/// single keyword's detail batch).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl FetchStatus {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, FetchStatus::Ready)
    }

    /// The user-facing message when the fetch failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}
