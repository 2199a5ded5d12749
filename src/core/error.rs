//! Typed error handling for atelier
//!
//! Every fallible operation in the crate returns one of the category errors
//! below, wrapped in [`AtelierError`] at the HTTP boundary.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: malformed client input (bad reorder payloads, invalid ids,
//!   records that fail field validation). Surfaced as `400`.
//! - [`StorageError`]: the record store is unreachable or rejected an operation.
//!   Propagated unchanged, never retried. Surfaced as a generic `500`.
//! - [`EntityError`]: a record addressed by id or slug does not exist.
//! - [`AuthError`]: an admin-only route was called without valid credentials.
//!
//! Malformed pagination, sort or select parameters are **not** errors: the query
//! builder absorbs them by defaulting or passing them through.
//!
//! # Example
//!
//! ```rust,ignore
//! match repository.get(&id).await {
//!     Err(AtelierError::Storage(e)) => tracing::error!("store down: {e}"),
//!     Err(AtelierError::Entity(EntityError::NotFound { .. })) => { /* 404 */ }
//!     other => { /* ... */ }
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Convenience alias used throughout the crate
pub type AtelierResult<T> = Result<T, AtelierError>;

/// The main error type for atelier
#[derive(Debug, Error)]
pub enum AtelierError {
    /// Client input errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Record store errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Missing records
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Missing or rejected credentials
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Error body returned to HTTP clients
///
/// Follows the `{success, message}` envelope used by every route.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AtelierError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AtelierError::Validation(_) => StatusCode::BAD_REQUEST,
            AtelierError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AtelierError::Entity(e) => e.status_code(),
            AtelierError::Auth(_) => StatusCode::UNAUTHORIZED,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AtelierError::Validation(e) => e.error_code(),
            AtelierError::Storage(_) => "STORAGE_ERROR",
            AtelierError::Entity(_) => "NOT_FOUND",
            AtelierError::Auth(_) => "UNAUTHORIZED",
        }
    }

    /// Whether this error was caused by the client's input
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            AtelierError::Validation(ValidationError::InvalidArgument { .. })
        )
    }

    /// Convert to an error response
    ///
    /// Storage failures are reported with a generic message; the detailed cause
    /// is only logged.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            AtelierError::Storage(_) => "Server Error".to_string(),
            other => other.to_string(),
        };

        ErrorResponse {
            success: false,
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AtelierError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for AtelierError {
    fn into_response(self) -> Response {
        if let AtelierError::Storage(e) = &self {
            tracing::error!(error = %e, "record store failure");
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors caused by malformed client input
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required argument is missing or has the wrong shape
    #[error("{message}")]
    InvalidArgument { argument: String, message: String },

    /// One or more record fields failed validation
    #[error("Validation errors: {}", format_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Request body is not a usable JSON document
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// Path id is not a valid identifier
    #[error("Invalid id format: {value}")]
    InvalidId { value: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn format_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            ValidationError::InvalidId { .. } => "INVALID_ID",
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

impl From<validator::ValidationErrors> for AtelierError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AtelierError::Validation(errors.into())
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by record store backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection error
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// Query or write rejected by the backend
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// Stored document could not be converted
    #[error("Failed to convert document: {message}")]
    SerializationError { message: String },
}

impl StorageError {
    pub fn query(backend: &str, message: impl std::fmt::Display) -> Self {
        StorageError::QueryError {
            backend: backend.to_string(),
            message: message.to_string(),
        }
    }

    pub fn serialization(message: impl std::fmt::Display) -> Self {
        StorageError::SerializationError {
            message: message.to_string(),
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to addressing individual records
#[derive(Debug, Error)]
pub enum EntityError {
    /// No record with this id
    #[error("{entity_type} not found")]
    NotFound { entity_type: String, id: String },
}

impl EntityError {
    pub fn not_found(entity_type: &str, id: impl std::fmt::Display) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Errors related to caller authentication
#[derive(Debug, Error)]
pub enum AuthError {
    /// Admin-only route called anonymously
    #[error("Not authorized to access this route")]
    Unauthenticated,
}
