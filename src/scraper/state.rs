/// Scrape progress states
///
/// `Idle → Rendering → Decoding → {Success | RetryPending → Rendering | Failed}`
use std::fmt;

/// Represents where a scrape run currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrapeState {
    // ===== Active States =====
    /// Endpoint built, no attempt made yet
    Idle,

    /// Waiting on the render client
    Rendering,

    /// Decoding the text the render client returned
    Decoding,

    /// Last payload was malformed; another attempt is allowed
    RetryPending,

    // ===== Terminal States =====
    /// A complete response was decoded
    Success,

    /// Render error, or the retry budget ran out
    Failed,
}

impl ScrapeState {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }

    /// Returns true if moving from `self` to `next` is a legal step
    pub fn can_transition_to(&self, next: ScrapeState) -> bool {
        use ScrapeState::*;

        matches!(
            (self, next),
            (Idle, Rendering)
                | (Rendering, Decoding)
                | (Rendering, Failed)
                | (Decoding, Success)
                | (Decoding, RetryPending)
                | (Decoding, Failed)
                | (RetryPending, Rendering)
        )
    }

    /// Lower-case name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Rendering => "rendering",
            Self::Decoding => "decoding",
            Self::RetryPending => "retry_pending",
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ScrapeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
