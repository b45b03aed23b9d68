use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Response model for the dashboard endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Username of the signed-in user
    pub username: String,

    /// Email the account was registered with
    pub email: String,
}

/// Response model for the profile endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// User id (UUID string)
    pub user_id: String,

    /// Username
    pub username: String,

    /// Email address
    pub email: String,

    /// Whether the account has moderation rights
    pub is_admin: bool,

    /// Account creation time (Unix timestamp)
    pub created_at: i64,
}
