//! Output module for exporting scraped comments
//!
//! This module handles:
//! - Rendering comment records as CSV
//! - Writing the CSV document next to the user (`<slug>-comments.csv`)

mod file;
mod table;

pub use file::{output_path, save_comments};
pub use table::{comments_to_csv, write_comments, COLUMNS};

use thiserror::Error;

/// Errors that can occur during export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
