use crate::errors::auth::AuthError;
use crate::errors::board::BoardError;
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

/// Error types for the per-game review endpoints
#[derive(ApiResponse, Debug)]
pub enum GameReviewError {
    /// Review text was empty after trimming
    #[oai(status = 400)]
    EmptyReview(Json<ErrorResponse>),

    /// Caller already has a review on this game
    #[oai(status = 409)]
    DuplicateReview(Json<ErrorResponse>),

    /// Caller is neither the review owner nor an admin
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Unknown game or no matching review
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Missing or invalid access token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl GameReviewError {
    /// Create an EmptyReview error
    pub fn empty_review() -> Self {
        GameReviewError::EmptyReview(Json(ErrorResponse {
            error: "empty_review".to_string(),
            message: "Review text must not be empty".to_string(),
            status_code: 400,
        }))
    }

    /// Create a DuplicateReview error
    pub fn duplicate_review() -> Self {
        GameReviewError::DuplicateReview(Json(ErrorResponse {
            error: "duplicate_review".to_string(),
            message: "You have already reviewed this game".to_string(),
            status_code: 409,
        }))
    }

    /// Create a Forbidden error
    pub fn forbidden() -> Self {
        GameReviewError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message: "Only the review owner or an admin may modify a review".to_string(),
            status_code: 403,
        }))
    }

    /// Create a NotFound error
    pub fn not_found(message: impl Into<String>) -> Self {
        GameReviewError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: message.into(),
            status_code: 404,
        }))
    }

    /// Create an Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        GameReviewError::Unauthorized(Json(ErrorResponse {
            error: "unauthorized".to_string(),
            message: message.into(),
            status_code: 401,
        }))
    }

    /// Create an InternalError
    pub fn internal_error(message: String) -> Self {
        GameReviewError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            GameReviewError::EmptyReview(json) => json.0.message.clone(),
            GameReviewError::DuplicateReview(json) => json.0.message.clone(),
            GameReviewError::Forbidden(json) => json.0.message.clone(),
            GameReviewError::NotFound(json) => json.0.message.clone(),
            GameReviewError::Unauthorized(json) => json.0.message.clone(),
            GameReviewError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for GameReviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<BoardError> for GameReviewError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::EmptyReview => GameReviewError::empty_review(),
            BoardError::DuplicateReview(_) => GameReviewError::duplicate_review(),
            BoardError::Forbidden => GameReviewError::forbidden(),
            BoardError::ReviewNotFound(username) => {
                GameReviewError::not_found(format!("No review by {username} found for this game"))
            }
        }
    }
}

impl From<AuthError> for GameReviewError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InternalError(json) => GameReviewError::InternalError(json),
            other => GameReviewError::unauthorized(other.message()),
        }
    }
}
