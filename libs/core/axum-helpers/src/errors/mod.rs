pub mod codes;
pub mod handlers;
pub mod page;

pub use codes::ErrorCode;
pub use page::{ErrorPages, render_error_pages};

use axum::{
    extract::{multipart::MultipartError, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Error as UuidError;
use validator::ValidationErrors;

use crate::views::ViewError;

/// Error details carried on a response for the error-page stage.
///
/// `message` is safe to show to any visitor; `detail` holds the underlying
/// cause and is only rendered outside production.
#[derive(Clone, Debug)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: String,
    pub detail: Option<String>,
}

impl ErrorReport {
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Report for a bare status produced outside [`AppError`] (router
    /// rejections, unknown routes).
    pub fn from_status(status: StatusCode) -> Self {
        let code = match status {
            StatusCode::NOT_FOUND => ErrorCode::NotFound,
            StatusCode::UNAUTHORIZED => ErrorCode::Unauthorized,
            StatusCode::FORBIDDEN => ErrorCode::Forbidden,
            StatusCode::SERVICE_UNAVAILABLE => ErrorCode::ServiceUnavailable,
            s if s.is_client_error() => ErrorCode::BadRequest,
            _ => ErrorCode::InternalError,
        };
        Self::new(status, code, code.default_message())
    }
}

/// Site error kinds.
///
/// Converting into a response attaches an [`ErrorReport`] extension, which
/// [`render_error_pages`] turns into the shared error page.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("UUID error: {0}")]
    UuidError(#[from] UuidError),

    #[error("Form error: {0}")]
    FormRejection(#[from] FormRejection),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Template error: {0}")]
    Template(#[from] ViewError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Image host error: {0}")]
    ImageHost(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Build the report shown on the error page, logging at a level matching
    /// the severity.
    pub fn report(&self) -> ErrorReport {
        let detail = self.to_string();

        match self {
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {:?}",
                    e
                );
                ErrorReport::new(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError,
                    ErrorCode::ValidationError.default_message(),
                )
                .with_detail(validation_detail(e))
            }
            AppError::UuidError(e) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidUuid.code(),
                    "UUID error: {:?}",
                    e
                );
                ErrorReport::new(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidUuid,
                    ErrorCode::InvalidUuid.default_message(),
                )
                .with_detail(detail)
            }
            AppError::FormRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidForm.code(),
                    "Form rejection: {:?}",
                    e
                );
                ErrorReport::new(
                    e.status(),
                    ErrorCode::InvalidForm,
                    ErrorCode::InvalidForm.default_message(),
                )
                .with_detail(e.body_text())
            }
            AppError::Multipart(e) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidForm.code(),
                    "Multipart error: {:?}",
                    e
                );
                ErrorReport::new(
                    e.status(),
                    ErrorCode::InvalidForm,
                    ErrorCode::InvalidForm.default_message(),
                )
                .with_detail(e.body_text())
            }
            AppError::Session(e) => {
                tracing::error!(
                    error_code = ErrorCode::SessionError.code(),
                    "Session error: {:?}",
                    e
                );
                server_error(ErrorCode::SessionError, detail)
            }
            AppError::Template(e) => {
                tracing::error!(
                    error_code = ErrorCode::TemplateError.code(),
                    "Template error: {:?}",
                    e
                );
                server_error(ErrorCode::TemplateError, detail)
            }
            AppError::Database(msg) => {
                tracing::error!(
                    error_code = ErrorCode::DatabaseError.code(),
                    "Database error: {}",
                    msg
                );
                server_error(ErrorCode::DatabaseError, detail)
            }
            AppError::ImageHost(msg) => {
                tracing::error!(
                    error_code = ErrorCode::ImageHostError.code(),
                    "Image host error: {}",
                    msg
                );
                ErrorReport::new(
                    StatusCode::BAD_GATEWAY,
                    ErrorCode::ImageHostError,
                    ErrorCode::ImageHostError.default_message(),
                )
                .with_detail(detail)
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                ErrorReport::new(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg.clone())
            }
            AppError::Unauthorized(msg) => {
                tracing::info!("Unauthorized: {}", msg);
                ErrorReport::new(StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, msg.clone())
            }
            AppError::Forbidden(msg) => {
                tracing::info!("Forbidden: {}", msg);
                ErrorReport::new(StatusCode::FORBIDDEN, ErrorCode::Forbidden, msg.clone())
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                ErrorReport::new(StatusCode::NOT_FOUND, ErrorCode::NotFound, msg.clone())
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                server_error(ErrorCode::InternalError, detail)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                ErrorReport::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::ServiceUnavailable,
                    ErrorCode::ServiceUnavailable.default_message(),
                )
                .with_detail(detail)
            }
        }
    }
}

fn server_error(code: ErrorCode, detail: String) -> ErrorReport {
    ErrorReport::new(StatusCode::INTERNAL_SERVER_ERROR, code, code.default_message())
        .with_detail(detail)
}

/// One line per invalid field, e.g. `star_rating: range`.
fn validation_detail(errors: &ValidationErrors) -> String {
    let mut lines: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let reasons: Vec<String> = errs
                .iter()
                .map(|err| {
                    err.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string())
                })
                .collect();
            format!("{}: {}", field, reasons.join(", "))
        })
        .collect();
    lines.sort();
    lines.join("\n")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error_response(self.report())
    }
}

/// Plain-text response carrying the report as an extension.
///
/// The body is only seen when the error-page stage is not installed.
pub fn error_response(report: ErrorReport) -> Response {
    let mut response = (report.status, report.message.clone()).into_response();
    response.extensions_mut().insert(report);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Listing {
        #[validate(range(min = 1, max = 5))]
        stars: i32,
    }

    fn report_of(error: AppError) -> ErrorReport {
        let response = error.into_response();
        response.extensions().get::<ErrorReport>().cloned().unwrap()
    }

    #[test]
    fn test_not_found_keeps_message() {
        let report = report_of(AppError::NotFound("Hotel not found".to_string()));
        assert_eq!(report.status, StatusCode::NOT_FOUND);
        assert_eq!(report.code, ErrorCode::NotFound);
        assert_eq!(report.message, "Hotel not found");
        assert!(report.detail.is_none());
    }

    #[test]
    fn test_database_error_hides_cause_in_message() {
        let report = report_of(AppError::Database("connection reset".to_string()));
        assert_eq!(report.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(report.message, ErrorCode::DatabaseError.default_message());
        assert!(report.detail.unwrap().contains("connection reset"));
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let errors = Listing { stars: 9 }.validate().unwrap_err();
        let report = report_of(AppError::ValidationError(errors));
        assert_eq!(report.status, StatusCode::BAD_REQUEST);
        assert_eq!(report.detail.as_deref(), Some("stars: range"));
    }

    #[test]
    fn test_from_status_defaults() {
        let report = ErrorReport::from_status(StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(report.code, ErrorCode::BadRequest);
        let report = ErrorReport::from_status(StatusCode::NOT_FOUND);
        assert_eq!(report.code, ErrorCode::NotFound);
    }
}
