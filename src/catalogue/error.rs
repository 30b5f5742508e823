use libris_http::AppError;
use serde_json::json;
use thiserror::Error;

use super::models::BookId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogueError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("\"{title}\" is currently unavailable.")]
    AlreadyReserved { book_id: BookId, title: String },

    #[error("malformed reservation id '{0}'")]
    MalformedId(String),

    #[error("{0}")]
    Validation(String),
}

impl CatalogueError {
    pub fn book_not_found(id: BookId) -> Self {
        Self::NotFound {
            entity: "book",
            id: id.to_string(),
        }
    }

    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "user",
            id: id.into(),
        }
    }
}

impl From<CatalogueError> for AppError {
    fn from(err: CatalogueError) -> Self {
        let message = err.to_string();
        match err {
            CatalogueError::NotFound { .. } => AppError::not_found(message),
            CatalogueError::AlreadyReserved { book_id, title } => AppError::conflict(
                vec![json!({ "book_id": book_id, "title": title })],
                message,
            ),
            CatalogueError::MalformedId(_) => AppError::bad_request(message),
            CatalogueError::Validation(_) => AppError::validation(Vec::new(), message),
        }
    }
}
