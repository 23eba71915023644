//! Scrape orchestration module
//!
//! This module contains the retry state machine that turns an article into a
//! decoded comment response:
//! - Building the comment endpoint
//! - Rendering it through a [`crate::render::RenderClient`]
//! - Decoding the payload and retrying while it is incomplete

mod orchestrator;
mod state;

pub use orchestrator::{scrape, ScrapeOutcome};
pub use state::ScrapeState;
