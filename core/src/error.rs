//! Error types for the catalog client and the favorites store.

use thiserror::Error;

/// Errors returned by `BookstoreClient` parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested book or category does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-200 status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),
}

#[derive(Debug, Error)]
pub enum FavoritesError {
    /// The favorites context was used before `activate`.
    #[error("favorites context used before activation")]
    NotInitialized,

    #[error("favorites storage failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("favorites encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
