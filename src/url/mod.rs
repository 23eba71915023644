//! URL handling module for dm-scrape
//!
//! This module turns a raw article URL into an [`ArticleRef`] and builds the
//! comment-API endpoint for it.

mod endpoint;
mod resolver;

// Re-export main types and functions
pub use endpoint::build_endpoint;
pub use resolver::{ArticleRef, ArticleResolver};
