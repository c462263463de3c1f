//! Periodically polled data feeds and their shared state.

pub mod service;

pub use service::DashboardService;

/// State of one feed slot as seen by the UI
#[derive(Debug, Clone, PartialEq)]
pub enum FeedStatus<T> {
    /// No fetch has completed yet
    Loading,
    /// The most recent fetch succeeded
    Ready(T),
    /// The most recent fetch failed; carries the placeholder text to show
    Unavailable(String),
}

impl<T> FeedStatus<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            FeedStatus::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FeedStatus::Loading)
    }
}
