//! CSV rendering of comment records
//!
//! Output is deterministic: a fixed header, one row per record in input
//! order, `\n` line endings and quoting only where a field needs it.

use crate::comments::CommentRecord;
use crate::output::ExportResult;
use csv::{Terminator, WriterBuilder};
use std::io::Write;

/// Header row, in column order
pub const COLUMNS: [&str; 13] = [
    "user-alias",
    "user-location",
    "formatted-date-and-time",
    "asset-id",
    "vote-count",
    "id",
    "user-identifier",
    "has-profile-picture",
    "vote-rating",
    "date-created",
    "asset-comment-count",
    "asset-url",
    "message",
];

/// Writes the header and one row per record to `writer`
///
/// # Errors
///
/// Returns [`crate::output::ExportError`] only if the underlying writer fails.
pub fn write_comments<W: Write>(writer: W, records: &[CommentRecord]) -> ExportResult<()> {
    let mut csv = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(COLUMNS)?;
    for record in records {
        csv.write_record(&to_row(record))?;
    }
    csv.flush()?;

    Ok(())
}

/// Renders comments as CSV bytes
///
/// # Example
///
/// ```
/// use dm_scrape::output::comments_to_csv;
///
/// let bytes = comments_to_csv(&[]).unwrap();
/// assert!(String::from_utf8(bytes).unwrap().starts_with("user-alias,user-location,"));
/// ```
pub fn comments_to_csv(records: &[CommentRecord]) -> ExportResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_comments(&mut buffer, records)?;
    Ok(buffer)
}

fn to_row(record: &CommentRecord) -> [String; 13] {
    [
        record.user_alias.clone(),
        record.user_location.clone(),
        record.formatted_date.clone(),
        optional(record.asset_id),
        optional(record.vote_count),
        record.id.to_string(),
        record.user_identifier.clone(),
        record.has_profile_picture.to_string(),
        optional(record.vote_rating),
        record.date_created.clone(),
        optional(record.asset_comment_count),
        record.asset_url.clone(),
        record.message.clone(),
    ]
}

fn optional(value: Option<i64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}
