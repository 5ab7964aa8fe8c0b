//! Error types for nichescout-core.
//!
//! One enum per external concern: remote research calls and the record
//! store. Both carry user-presentable messages; the workflow decides which
//! failures surface and which are logged only.

use thiserror::Error;

/// Errors that can occur during remote research operations.
#[derive(Debug, Clone, Error)]
pub enum ResearchError {
    /// The backend call itself failed (network, HTTP status, transport)
    #[error("{0}")]
    RequestFailed(String),
    /// The backend answered but returned no usable content
    #[error("{0}")]
    EmptyResponse(String),
    /// The backend returned content that could not be parsed
    #[error("{0}")]
    InvalidResponse(String),
}

/// Errors that can occur during record store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A user-scoped write was attempted without a signed-in user
    #[error("You must be logged in to save ideas.")]
    NotSignedIn,
    /// Saving an idea requires a non-empty topic
    #[error("Topic is required to save an idea.")]
    MissingTopic,
    /// Backend-specific failure (HTTP status, lock poisoning, ...)
    #[error("Database error: {0}")]
    Database(String),
    /// Record encoding/decoding failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}
