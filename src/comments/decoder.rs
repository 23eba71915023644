//! Comment response decoding
//!
//! The browser hands back whatever text the payload element held when it was
//! read. If the page script had not finished, that text is empty or cut
//! short, and decoding fails; the orchestrator treats that failure as
//! transient.

use crate::comments::CommentResponse;
use tracing::debug;

/// Decodes raw element text into a [`CommentResponse`]
///
/// All or nothing: there is no best-effort recovery from truncated input.
///
/// # Errors
///
/// Returns [`crate::ScrapeError::Decode`] if the text is not a complete
/// comment response.
pub fn decode(raw: &str) -> crate::Result<CommentResponse> {
    debug!(bytes = raw.len(), "decoding comment response");
    let response: CommentResponse = serde_json::from_str(raw.trim())?;
    Ok(response)
}
