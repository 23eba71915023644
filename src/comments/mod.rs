//! Reader-comment data model and decoding

mod decoder;
mod types;

pub use decoder::decode;
pub use types::{CommentRecord, CommentResponse, Payload};
