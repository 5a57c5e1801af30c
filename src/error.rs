//! Error types for the key cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Key Cache Error Enum ==
/// Unified error type for the key cache and its HTTP surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyCacheError {
    /// No entry for the identifier, or the downloaded batch lacked it
    #[error("Key not found: {0}")]
    NotFound(String),

    /// An entry existed but outlived the max age; it has been removed
    #[error("Key expired: {0}")]
    Expired(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for KeyCacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            KeyCacheError::NotFound(_) | KeyCacheError::Expired(_) => StatusCode::NOT_FOUND,
            KeyCacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the key cache.
pub type Result<T> = std::result::Result<T, KeyCacheError>;
