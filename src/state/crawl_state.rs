/// Crawl state definitions for the link-following strategy
///
/// The sequential crawler walks `Start → Fetching → Extracting → Navigating`
/// and then either loops back to `Fetching` or stops in a terminal state.
use std::fmt;

/// Represents where a crawl run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    // ===== Active States =====
    /// Configured but nothing fetched yet
    Start,

    /// A page request is in flight
    Fetching,

    /// Records are being extracted from the fetched page
    Extracting,

    /// Looking up the next page reference
    Navigating,

    // ===== Terminal States =====
    /// No further page: the sequence was exhausted
    Done,

    /// A page could not be fetched; collected records are kept
    Aborted,
}

impl CrawlState {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    /// Returns true if the transition `self → next` is part of the state machine
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        use CrawlState::*;

        matches!(
            (self, next),
            (Start, Fetching)
                | (Fetching, Extracting)
                | (Fetching, Aborted)
                | (Extracting, Navigating)
                | (Navigating, Fetching)
                | (Navigating, Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Navigating => "navigating",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
