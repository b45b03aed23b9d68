use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};

/// Traffic-light colour for the aggregated positive-review percentage
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RatingColor {
    Green,
    Orange,
    Red,
}

/// A catalog entry as shown in the game list
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct GameSummary {
    /// External review-API identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Header image URL
    pub image_url: String,
}

/// Response model for the game list endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct GameListResponse {
    pub games: Vec<GameSummary>,
}

/// A review held on the ephemeral review board
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct BoardReviewView {
    /// Username of the reviewer
    pub username: String,

    /// Review text
    pub text: String,
}

/// An excerpt sampled from the external review API
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct SampleReview {
    /// External author identifier
    pub author_id: String,

    /// Review text
    pub text: String,

    /// Whether the external reviewer recommended the game
    pub voted_up: bool,
}

/// Response model for the game detail endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct GameDetailResponse {
    pub game_id: String,
    pub name: String,
    pub image_url: String,

    /// Positive-review percentage from the external API (0 on failure)
    pub positive_pct: u8,
    pub rating_color: RatingColor,

    /// Sampled external review excerpts (empty on failure)
    pub sample_reviews: Vec<SampleReview>,

    /// Reviews posted on this site, oldest first
    pub reviews: Vec<BoardReviewView>,

    /// Whether the signed-in caller already reviewed this game
    pub has_reviewed: bool,
}

/// Request model for adding a review to the board
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AddReviewRequest {
    /// Review text; must not be empty after trimming
    pub text: String,
}

/// Request model for editing a board review
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct EditReviewRequest {
    /// Replacement review text
    pub text: String,
}
