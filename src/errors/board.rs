use thiserror::Error;

/// Domain errors for the ephemeral review board
///
/// Not exposed via the API directly - endpoints convert to GameReviewError.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("review text must not be empty")]
    EmptyReview,

    #[error("{0} has already reviewed this game")]
    DuplicateReview(String),

    #[error("only the review owner or an admin may modify a review")]
    Forbidden,

    #[error("no review by {0} found for this game")]
    ReviewNotFound(String),
}
