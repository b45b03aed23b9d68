use serde::{Deserialize, Serialize};

/// JWT claims carried by access tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id (UUID string)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued-at time (Unix timestamp)
    pub iat: i64,
}
