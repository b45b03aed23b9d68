use crate::errors::auth::AuthError;
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

/// Error types for the admin moderation endpoints
#[derive(ApiResponse, Debug)]
pub enum AdminError {
    /// Caller is not an admin
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// No moderated review with the given id
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Rating outside the allowed range
    #[oai(status = 400)]
    InvalidRating(Json<ErrorResponse>),

    /// Missing or invalid access token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AdminError {
    /// Create a Forbidden error
    ///
    /// Same body for every non-admin caller, whatever they attempted.
    pub fn forbidden() -> Self {
        AdminError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message: "Administrator access required".to_string(),
            status_code: 403,
        }))
    }

    /// Create a NotFound error
    pub fn not_found(id: i32) -> Self {
        AdminError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: format!("No moderated review with id {id}"),
            status_code: 404,
        }))
    }

    /// Create an InvalidRating error
    pub fn invalid_rating() -> Self {
        AdminError::InvalidRating(Json(ErrorResponse {
            error: "invalid_rating".to_string(),
            message: "Rating must be between 1 and 5".to_string(),
            status_code: 400,
        }))
    }

    /// Create an Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        AdminError::Unauthorized(Json(ErrorResponse {
            error: "unauthorized".to_string(),
            message: message.into(),
            status_code: 401,
        }))
    }

    /// Create an InternalError
    pub fn internal_error(message: String) -> Self {
        AdminError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AdminError::Forbidden(json) => json.0.message.clone(),
            AdminError::NotFound(json) => json.0.message.clone(),
            AdminError::InvalidRating(json) => json.0.message.clone(),
            AdminError::Unauthorized(json) => json.0.message.clone(),
            AdminError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<AuthError> for AdminError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InternalError(json) => AdminError::InternalError(json),
            other => AdminError::unauthorized(other.message()),
        }
    }
}
