use serde::{Deserialize, Deserializer, Serialize};

/// Envelope returned by the reader-comments API
///
/// `payload` (and its `page`) must be present; a document without them is
/// not a comment response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    pub payload: Payload,
}

/// Paging information and the comments themselves
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Total comments on the article
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: i64,

    /// Page size the server honoured
    #[serde(default, deserialize_with = "null_as_default")]
    pub max: i64,

    /// Comments, in server order; `null` reads as no comments
    #[serde(deserialize_with = "null_as_default")]
    pub page: Vec<CommentRecord>,
}

/// A single reader comment
///
/// Fields are passed through as the server sends them. Absent or null
/// strings are empty; absent optional numbers stay `None` and export as
/// empty cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub user_alias: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_location: String,
    #[serde(rename = "formattedDateAndTime", deserialize_with = "null_as_default")]
    pub formatted_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub user_identifier: String,
    #[serde(deserialize_with = "null_as_default")]
    pub has_profile_picture: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_rating: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub date_created: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_comment_count: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub asset_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

impl CommentResponse {
    /// Comments in server order
    pub fn comments(&self) -> &[CommentRecord] {
        &self.payload.page
    }
}

/// The API sends `null` for fields it has no value for
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
