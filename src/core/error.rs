//! Typed error handling for the park API
//!
//! Handlers return [`ApiError`], which maps every failure to an HTTP status
//! and a JSON body:
//!
//! - [`EntityError`]: a primary or related row is missing, or a delete would
//!   orphan dependent rows
//! - [`ValidationError`]: the request body or path did not describe a valid input
//! - [`RequestError`]: credential and content-type problems
//! - [`StorageError`]: the entity store itself failed
//!
//! Server faults never echo their cause to the client. The cause is logged
//! with `tracing` and the response carries a generic message.
//!
//! # Example
//!
//! ```rust,ignore
//! let area = state
//!     .store
//!     .park_areas
//!     .get(id)
//!     .await?
//!     .ok_or(EntityError::NotFound { entity_type: "parkarea", id })?;
//! ```

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type returned by handlers
#[derive(Debug)]
pub enum ApiError {
    /// Entity-related errors (lookups, referential checks)
    Entity(EntityError),

    /// Input validation errors
    Validation(ValidationError),

    /// HTTP/request errors
    Request(RequestError),

    /// Storage backend errors
    Storage(StorageError),

    /// Invariant violations inside the service
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Entity(e) => write!(f, "{}", e),
            ApiError::Validation(e) => write!(f, "{}", e),
            ApiError::Request(e) => write!(f, "{}", e),
            ApiError::Storage(e) => write!(f, "{}", e),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Entity(e) => Some(e),
            ApiError::Validation(e) => Some(e),
            ApiError::Request(e) => Some(e),
            ApiError::Storage(e) => Some(e),
            ApiError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Entity(e) => e.status_code(),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Request(e) => e.status_code(),
            ApiError::Storage(StorageError::Duplicate { .. }) => StatusCode::CONFLICT,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Entity(e) => e.error_code(),
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Request(e) => e.error_code(),
            ApiError::Storage(StorageError::Duplicate { .. }) => "DUPLICATE_ENTITY",
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error is the server's fault rather than the caller's
    pub fn is_server_fault(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Convert to an error response
    ///
    /// Server faults get a generic message; the real cause stays in the logs.
    pub fn to_response(&self) -> ErrorResponse {
        let message = if self.is_server_fault() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id
                }))
            }
            ApiError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            ApiError::Validation(ValidationError::FieldError { field, message }) => {
                Some(serde_json::json!({ "fields": [{ "field": field, "message": message }] }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let mut response = (status, Json(self.to_response())).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Token"));
        }

        response
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups and referential rules
#[derive(Debug)]
pub enum EntityError {
    /// Primary or related entity was not found
    NotFound { entity_type: &'static str, id: i64 },

    /// Operation would break a relationship another row depends on
    Conflict {
        entity_type: &'static str,
        message: String,
    },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", entity_type, id)
            }
            EntityError::Conflict {
                entity_type,
                message,
            } => {
                write!(f, "Conflict on {}: {}", entity_type, message)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::Conflict { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::Conflict { .. } => "ENTITY_CONFLICT",
        }
    }
}

impl From<EntityError> for ApiError {
    fn from(err: EntityError) -> Self {
        ApiError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// Body is not valid JSON or does not match the expected shape
    InvalidJson { message: String },

    /// Identifier in the path or query string is not an integer
    InvalidId { value: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
            ValidationError::InvalidId { value } => {
                write!(f, "Invalid id: '{}'", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
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

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.into())
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// Missing or invalid credentials
    Unauthorized { message: String },

    /// Body content type is not accepted by the endpoint
    UnsupportedMediaType { content_type: String },

    /// Invalid request body
    InvalidBody { message: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Unauthorized { message } => {
                write!(f, "Unauthorized: {}", message)
            }
            RequestError::UnsupportedMediaType { content_type } => {
                write!(f, "Unsupported media type: '{}'", content_type)
            }
            RequestError::InvalidBody { message } => {
                write!(f, "Invalid request body: {}", message)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RequestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
            RequestError::UnsupportedMediaType { .. } => "UNSUPPORTED_MEDIA_TYPE",
            RequestError::InvalidBody { .. } => "INVALID_BODY",
        }
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::Request(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by storage backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Could not open the backing store
    #[error("Failed to connect to {backend}: {message}")]
    Connection {
        backend: &'static str,
        message: String,
    },

    /// Query execution error
    #[error("{backend} query error: {message}")]
    Query {
        backend: &'static str,
        message: String,
    },

    /// A row would violate a uniqueness constraint
    #[error("Duplicate {entity_type}: {message}")]
    Duplicate {
        entity_type: &'static str,
        message: String,
    },

    /// A lookup named a column that is not a reference of the entity
    #[error("'{field}' is not a reference field of {entity_type}")]
    UnknownField {
        entity_type: &'static str,
        field: String,
    },

    /// A stored row could not be decoded
    #[error("Corrupt {entity_type} row: {message}")]
    Corrupt {
        entity_type: &'static str,
        message: String,
    },

    /// In-memory lock was poisoned by a panicking writer
    #[error("Storage lock poisoned: {0}")]
    LockPoisoned(String),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Storage(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Internal(format!("I/O failure: {}", err))
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// A specialized Result type for storage backends
pub type StorageResult<T> = Result<T, StorageError>;

/// Parse a primary key taken from a path segment or query parameter
pub fn parse_id(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ValidationError::InvalidId {
            value: raw.to_string(),
        })
}

// =============================================================================
// Tests
// =============================================================================
