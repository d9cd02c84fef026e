//! Unified error types for the Pewter core.
//!
//! This module provides the error taxonomy shared by every adapter:
//! - [`LookupError`]: failures surfaced by an entity lookup collaborator
//! - [`AdapterError`]: failures that prevent an adapter from producing an entity
//!
//! Configuration errors live in `pewter-runtime`.

use thiserror::Error;

// =============================================================================
// Lookup Errors
// =============================================================================

/// Errors that can occur while resolving platform identifiers into entities.
///
/// A lookup that completes but finds nothing is **not** an error; lookups
/// that can legitimately miss return `Ok(None)` instead.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// The lookup service is not reachable.
    #[error("lookup service is not connected")]
    NotConnected,

    /// The lookup call timed out.
    #[error("lookup call timed out")]
    Timeout,

    /// The platform API answered with an error.
    #[error("API error: {error}")]
    Api {
        /// Platform error code (e.g. `user_not_found`).
        error: String,
    },

    /// The response could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl LookupError {
    /// Creates an API error from a platform error code.
    pub fn api(error: impl Into<String>) -> Self {
        Self::Api {
            error: error.into(),
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

// =============================================================================
// Adapter Errors
// =============================================================================

/// Errors that can occur while turning raw events into entities.
#[derive(Debug, Clone, Error)]
pub enum AdapterError {
    /// Event parsing failed.
    #[error("failed to parse event: {reason}")]
    ParseError {
        /// Reason for failure.
        reason: String,
    },

    /// The lookup collaborator failed for the whole message.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Resolution was requested on an entity that already ran it.
    #[error("message text has already been resolved")]
    AlreadyResolved,

    /// The entity was read before resolution completed.
    #[error("message text has not been resolved")]
    NotResolved,
}

impl AdapterError {
    /// Creates a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError { reason: msg.into() }
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;

/// Result type for adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;
