//! # Error Types
//!
//! This module defines error types used throughout the opinar service.

use thiserror::Error;

/// Main error type for opinar operations
#[derive(Debug, Error)]
pub enum OpinarError {
    /// Payload does not fit the largest supported QR symbol version
    #[error("QR encoding error: {0}")]
    Encoding(String),

    /// Image processing error (render, resize, PNG serialization)
    #[error("Image error: {0}")]
    Image(String),

    /// Database error wrapper
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Server-level errors (bind, accept loop)
    #[error("Server error: {0}")]
    Server(String),

    /// JSON serialization error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
