use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::images::ImageError;

#[derive(Debug, Error)]
pub enum HotelError {
    #[error("Hotel not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("Image upload failed: {0}")]
    ImageUpload(#[source] ImageError),

    #[error("Database error: {0}")]
    Database(String),
}

pub type HotelResult<T> = Result<T, HotelError>;

/// Convert HotelError to AppError for the shared error page
impl From<HotelError> for AppError {
    fn from(err: HotelError) -> Self {
        match err {
            HotelError::NotFound(id) => AppError::NotFound(format!("Hotel {} not found", id)),
            HotelError::Validation(errors) => AppError::ValidationError(errors),
            HotelError::InvalidField { field, value } => {
                AppError::BadRequest(format!("'{}' is not a valid {}", value, field))
            }
            HotelError::ImageUpload(e) => AppError::ImageHost(e.to_string()),
            HotelError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for HotelError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for HotelError {
    fn from(err: mongodb::error::Error) -> Self {
        HotelError::Database(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for HotelError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        HotelError::Database(format!("Failed to decode hotel document: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = HotelError::NotFound(Uuid::nil()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_field_maps_to_400() {
        let err = HotelError::InvalidField {
            field: "cost_per_night",
            value: "cheap".to_string(),
        };
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_error_maps_to_500() {
        let err = HotelError::Database("no primary".to_string());
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
