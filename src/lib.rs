//! dm-scrape: Daily Mail reader-comment scraper
//!
//! The comment API only answers requests made by a real browser, so this crate
//! renders the endpoint in headless Chromium, pulls the JSON payload out of the
//! page, retries while the payload is still half-written, and exports the
//! comments as CSV.
//!
//! Pipeline: [`url::ArticleResolver`] → [`url::build_endpoint`] →
//! [`scraper::scrape`] (driving a [`render::RenderClient`] and
//! [`comments::decode`]) → [`output::comments_to_csv`].

pub mod comments;
pub mod config;
pub mod output;
pub mod render;
pub mod scraper;
pub mod url;

use std::time::Duration;
use thiserror::Error;

/// Main error type for dm-scrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid daily mail article url {url}: {reason}")]
    InvalidUrl {
        url: String,
        reason: String,
        #[source]
        source: Option<::url::ParseError>,
    },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("malformed comment response")]
    Decode(#[from] serde_json::Error),

    #[error("comment response still malformed after {attempts} attempts")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: serde_json::Error,
    },

    #[error("Export error: {0}")]
    Export(#[from] output::ExportError),
}

impl ScrapeError {
    /// Builds an [`ScrapeError::InvalidUrl`] without an underlying parse error
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Returns the kind of failure, independent of its payload
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            Self::Render(RenderError::Timeout { .. }) => ErrorKind::RenderTimeout,
            Self::Render(RenderError::Launch(_) | RenderError::Failure { .. }) => {
                ErrorKind::RenderFailure
            }
            Self::Decode(_) => ErrorKind::Decode,
            Self::RetriesExhausted { .. } => ErrorKind::RetriesExhausted,
            Self::Export(_) => ErrorKind::Export,
        }
    }
}

/// Flat classification of [`ScrapeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    InvalidUrl,
    RenderTimeout,
    RenderFailure,
    Decode,
    RetriesExhausted,
    Export,
}

impl ErrorKind {
    /// Returns true if a fresh attempt may succeed where this one failed
    ///
    /// Only a malformed payload qualifies: it means the page was read before
    /// its script finished writing the JSON. A timeout will not improve by
    /// retrying with the same budget.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Decode)
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Errors raised by a [`render::RenderClient`]
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("too long waiting for comments to load from {url} (waited {waited:?})")]
    Timeout { url: String, waited: Duration },

    #[error("failed to render {url}: {message}")]
    Failure {
        url: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl RenderError {
    /// Builds a [`RenderError::Failure`] wrapping an underlying error
    pub fn failure(
        url: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Failure {
            url: url.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type alias for dm-scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

// Re-export commonly used types
pub use comments::{CommentRecord, CommentResponse, Payload};
pub use config::{Config, ScrapeConfig};
pub use scraper::{scrape, ScrapeOutcome, ScrapeState};
pub use crate::url::{build_endpoint, ArticleRef, ArticleResolver};
