//! Type-safe error codes for rendered error pages and logs.
//!
//! Each error code includes:
//! - String representation shown on the error page (e.g., "VALIDATION_ERROR")
//! - Integer code for logging and monitoring (e.g., 1001)
//! - Default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Some of the submitted fields are invalid");
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Submitted form failed validation
    ValidationError,

    /// Invalid UUID format in a path segment
    InvalidUuid,

    /// Form or multipart body could not be read
    InvalidForm,

    /// Requested page or record was not found
    NotFound,

    /// No authenticated session
    Unauthorized,

    /// Authenticated user lacks admin rights
    Forbidden,

    /// Generic malformed request
    BadRequest,

    // Server errors (1100s)
    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    // Storage errors (2000s)
    /// Document store query or write failed
    DatabaseError,

    // Session errors (3000s)
    /// Session store read or write failed
    SessionError,

    // Rendering errors (4000s)
    /// Template registration or rendering failed
    TemplateError,

    // External service errors (5000s)
    /// Image host rejected or failed a request
    ImageHostError,
}

impl ErrorCode {
    /// Get the SCREAMING_SNAKE_CASE identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::InvalidForm => "INVALID_FORM",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::BadRequest => "BAD_REQUEST",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::SessionError => "SESSION_ERROR",
            Self::TemplateError => "TEMPLATE_ERROR",
            Self::ImageHostError => "IMAGE_HOST_ERROR",
        }
    }

    /// Get the integer code for logging and monitoring.
    ///
    /// Ranges:
    /// - 1000-1099: Client errors
    /// - 1100-1199: Server errors
    /// - 2000-2999: Storage errors
    /// - 3000-3999: Session errors
    /// - 4000-4999: Rendering errors
    /// - 5000-5999: External service errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::InvalidForm => 1003,
            Self::NotFound => 1004,
            Self::Unauthorized => 1006,
            Self::Forbidden => 1007,
            Self::BadRequest => 1010,

            Self::InternalError => 1100,
            Self::ServiceUnavailable => 1101,

            Self::DatabaseError => 2003,

            Self::SessionError => 3001,

            Self::TemplateError => 4001,

            Self::ImageHostError => 5001,
        }
    }

    /// Get the default user-facing error message.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Some of the submitted fields are invalid",
            Self::InvalidUuid => "That doesn't look like a valid hotel id",
            Self::InvalidForm => "The submitted form could not be read",
            Self::NotFound => "The page you were looking for could not be found",
            Self::Unauthorized => "Please log in to continue",
            Self::Forbidden => "You are not allowed to do that",
            Self::BadRequest => "The request could not be understood",
            Self::InternalError => "Something went wrong on our side",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseError => "Something went wrong while loading hotel data",
            Self::SessionError => "Your session could not be read",
            Self::TemplateError => "The page could not be rendered",
            Self::ImageHostError => "The image service is not responding",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
