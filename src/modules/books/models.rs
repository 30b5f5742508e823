use serde::{Deserialize, Serialize};

use crate::catalogue::Book;

/// Query string accepted by the book listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookSearch {
    /// Case-insensitive fragment of a title, author or genre
    #[serde(default)]
    pub q: Option<String>,
}

/// Response for book creation and updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookWithMessage {
    pub book: Book,
    pub message: String,
}
