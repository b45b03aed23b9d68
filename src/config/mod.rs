pub mod logging;

use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Admin account seeded at startup when configured
#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Application settings loaded from the environment
#[derive(Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub refresh_token_secret: String,
    pub password_pepper: String,
    pub review_api_base_url: String,
    pub admin_seed: Option<AdminSeed>,
}

impl Settings {
    /// Load settings, failing fast on missing secrets
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://playrate.db?mode=rwc".to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;
        let refresh_token_secret = env::var("REFRESH_TOKEN_SECRET")
            .map_err(|_| ConfigError::MissingVar("REFRESH_TOKEN_SECRET"))?;
        let password_pepper =
            env::var("PASSWORD_PEPPER").map_err(|_| ConfigError::MissingVar("PASSWORD_PEPPER"))?;

        let review_api_base_url = env::var("REVIEW_API_BASE_URL")
            .unwrap_or_else(|_| "https://store.steampowered.com/appreviews".to_string());

        // Admin seeding is opt-in; both variables must be present
        let admin_seed = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(AdminSeed {
                username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            database_url,
            bind_addr,
            jwt_secret,
            refresh_token_secret,
            password_pepper,
            review_api_base_url,
            admin_seed,
        })
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("database_url", &self.database_url)
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("refresh_token_secret", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .field("review_api_base_url", &self.review_api_base_url)
            .field("admin_seed", &self.admin_seed)
            .finish()
    }
}
