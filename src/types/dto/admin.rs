use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// A moderated review as shown on the admin surface
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ModeratedReviewView {
    pub id: i32,
    pub content: String,

    /// Star rating, 1-5
    pub rating: i32,

    /// Posting time (Unix timestamp)
    pub date_posted: i64,

    /// Author username, if the account still exists
    pub author: Option<String>,
}

/// Response model for the moderated review list
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ModeratedReviewListResponse {
    pub reviews: Vec<ModeratedReviewView>,
}

/// Request model for editing a moderated review
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateReviewRequest {
    /// Replacement content
    pub content: String,

    /// Replacement rating, 1-5
    pub rating: i32,
}
