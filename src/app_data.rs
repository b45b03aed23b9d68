use crate::config::{ConfigError, Settings};
use crate::services::aggregator::ReviewAggregator;
use crate::services::token_service::TokenService;
use crate::stores::{CredentialStore, ModeratedReviewStore, ReviewBoard};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across the API
/// endpoint groups.
pub struct AppData {
    pub db: DatabaseConnection,
    pub credential_store: Arc<CredentialStore>,
    pub moderated_review_store: Arc<ModeratedReviewStore>,
    pub review_board: Arc<ReviewBoard>,
    pub token_service: Arc<TokenService>,
    pub aggregator: Arc<ReviewAggregator>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database connection should be migrated before calling this.
    pub fn init(db: DatabaseConnection, settings: &Settings) -> Result<Self, ConfigError> {
        tracing::info!("Initializing AppData...");

        let credential_store = Arc::new(CredentialStore::new(
            db.clone(),
            settings.password_pepper.clone(),
        ));
        let moderated_review_store = Arc::new(ModeratedReviewStore::new(db.clone()));
        let review_board = Arc::new(ReviewBoard::new());
        let token_service = Arc::new(TokenService::new(
            settings.jwt_secret.clone(),
            settings.refresh_token_secret.clone(),
        ));
        let aggregator = Arc::new(ReviewAggregator::new(settings.review_api_base_url.clone())?);

        tracing::info!("AppData initialization complete");

        Ok(Self {
            db,
            credential_store,
            moderated_review_store,
            review_board,
            token_service,
            aggregator,
        })
    }
}
