//! Engine-wide error taxonomy.
//!
//! Every failure surfaced by a use case is an [`EngineError`]. Each variant
//! maps to a stable [`ErrorCode`] that callers can match on or serialize.
//!
//! | Code | HTTP | Usage |
//! |------|------|-------|
//! | `NOT_FOUND` | 404 | Portfolio or holding absent |
//! | `FORBIDDEN` | 403 | Portfolio not owned by the caller |
//! | `INVALID_STATE` | 409 | Operation on a non-active option lot |
//! | `VALIDATION_ERROR` | 400 | Malformed numeric input |
//! | `DEPENDENCY_FAILURE` | 502 | Store call failed |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::StoreError;
use crate::domain::shared::DomainError;

/// Stable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced entity does not exist.
    NotFound,
    /// Caller does not own the portfolio.
    Forbidden,
    /// Entity is in the wrong lifecycle state.
    InvalidState,
    /// Input failed validation.
    ValidationError,
    /// An external dependency failed.
    DependencyFailure,
}

impl ErrorCode {
    /// Reason string for this code.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidState => "INVALID_STATE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::DependencyFailure => "DEPENDENCY_FAILURE",
        }
    }

    /// HTTP status a transport layer should use.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Forbidden => 403,
            Self::InvalidState => 409,
            Self::ValidationError => 400,
            Self::DependencyFailure => 502,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// Errors returned by use cases.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind.
        entity: String,
        /// Identifier looked up.
        id: String,
    },

    /// Caller does not own the portfolio.
    #[error("Portfolio {portfolio_id} is not accessible to user {user_id}")]
    Forbidden {
        /// Portfolio requested.
        portfolio_id: String,
        /// Caller.
        user_id: String,
    },

    /// Entity is in the wrong lifecycle state.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Details.
        message: String,
    },

    /// Input failed validation.
    #[error("Validation failed for '{field}': {message}")]
    Validation {
        /// Offending field.
        field: String,
        /// Details.
        message: String,
    },

    /// A store call failed.
    #[error("Dependency failure during {operation}: {message}")]
    DependencyFailure {
        /// Step that failed.
        operation: String,
        /// Underlying error.
        message: String,
    },
}

impl EngineError {
    /// Stable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Forbidden { .. } => ErrorCode::Forbidden,
            Self::InvalidState { .. } => ErrorCode::InvalidState,
            Self::Validation { .. } => ErrorCode::ValidationError,
            Self::DependencyFailure { .. } => ErrorCode::DependencyFailure,
        }
    }

    /// Shorthand for a [`EngineError::Validation`].
    #[must_use]
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Wrap a store failure during `operation`.
    ///
    /// A store `NotFound` stays a `NotFound`; anything else is a dependency failure.
    #[must_use]
    pub fn from_store(operation: &str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => Self::NotFound { entity, id },
            StoreError::Backend(message) => Self::DependencyFailure {
                operation: operation.to_string(),
                message,
            },
        }
    }

    /// Wrap any store failure during `operation` as a dependency failure.
    ///
    /// Used mid-transaction, where even a missing row means the store
    /// misbehaved.
    #[must_use]
    pub fn dependency(operation: &str, err: &StoreError) -> Self {
        Self::DependencyFailure {
            operation: operation.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidValue { field, message } => Self::Validation { field, message },
            DomainError::InvalidStateTransition { .. } => Self::InvalidState {
                message: err.to_string(),
            },
            DomainError::NotFound { entity_type, id } => Self::NotFound {
                entity: entity_type,
                id,
            },
        }
    }
}
