use crate::api::auth::BearerAuth;
use crate::api::helpers::current_user;
use crate::errors::auth::AuthError;
use crate::services::token_service::TokenService;
use crate::stores::{CredentialStore, ReviewBoard};
use crate::types::dto::account::{DashboardResponse, ProfileResponse};
use crate::types::dto::common::MessageResponse;
use poem_openapi::{payload::Json, OpenApi, Tags};
use std::sync::Arc;

/// API tags for account endpoints
#[derive(Tags)]
enum AccountTags {
    /// Account management endpoints
    Account,
}

/// Account management API endpoints
pub struct AccountApi {
    credential_store: Arc<CredentialStore>,
    token_service: Arc<TokenService>,
    review_board: Arc<ReviewBoard>,
}

impl AccountApi {
    pub fn new(
        credential_store: Arc<CredentialStore>,
        token_service: Arc<TokenService>,
        review_board: Arc<ReviewBoard>,
    ) -> Self {
        Self {
            credential_store,
            token_service,
            review_board,
        }
    }
}

#[OpenApi(prefix_path = "/account")]
impl AccountApi {
    /// Dashboard greeting for the signed-in user
    #[oai(path = "/dashboard", method = "get", tag = "AccountTags::Account")]
    pub async fn dashboard(&self, auth: BearerAuth) -> Result<Json<DashboardResponse>, AuthError> {
        let user = current_user(&auth.0.token, &self.token_service, &self.credential_store).await?;

        Ok(Json(DashboardResponse {
            username: user.username,
            email: user.email,
        }))
    }

    /// Full profile of the signed-in user
    #[oai(path = "/profile", method = "get", tag = "AccountTags::Account")]
    pub async fn profile(&self, auth: BearerAuth) -> Result<Json<ProfileResponse>, AuthError> {
        let user = current_user(&auth.0.token, &self.token_service, &self.credential_store).await?;

        Ok(Json(ProfileResponse {
            user_id: user.id,
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }))
    }

    /// Acknowledge a settings update
    ///
    /// There are no persisted settings yet; the endpoint exists so clients
    /// have a stable place to post them.
    #[oai(path = "/settings", method = "post", tag = "AccountTags::Account")]
    pub async fn settings(&self, auth: BearerAuth) -> Result<Json<MessageResponse>, AuthError> {
        current_user(&auth.0.token, &self.token_service, &self.credential_store).await?;

        Ok(Json(MessageResponse {
            message: "Settings updated".to_string(),
        }))
    }

    /// Delete the signed-in user's account
    ///
    /// Removes the account, its refresh tokens and moderated reviews via
    /// cascade, and purges the user's board reviews.
    #[oai(path = "/", method = "delete", tag = "AccountTags::Account")]
    pub async fn delete_account(&self, auth: BearerAuth) -> Result<Json<MessageResponse>, AuthError> {
        let user = current_user(&auth.0.token, &self.token_service, &self.credential_store).await?;

        self.credential_store.delete_user(&user.id).await?;
        self.review_board.purge_user(&user.username);

        tracing::info!(username = %user.username, "account deleted");
        Ok(Json(MessageResponse {
            message: "Account deleted".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use poem_openapi::auth::Bearer;
    use sea_orm::Database;

    struct TestContext {
        api: AccountApi,
        token_service: Arc<TokenService>,
        credential_store: Arc<CredentialStore>,
        review_board: Arc<ReviewBoard>,
    }

    async fn setup() -> TestContext {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let credential_store = Arc::new(CredentialStore::new(
            db,
            "test-pepper-for-api-tests".to_string(),
        ));
        let token_service = Arc::new(TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
            "test-refresh-secret-minimum-32-chars".to_string(),
        ));
        let review_board = Arc::new(ReviewBoard::new());

        let api = AccountApi::new(
            credential_store.clone(),
            token_service.clone(),
            review_board.clone(),
        );

        TestContext {
            api,
            token_service,
            credential_store,
            review_board,
        }
    }

    async fn signed_in_user(ctx: &TestContext, username: &str) -> (String, BearerAuth) {
        let user = ctx
            .credential_store
            .add_user(
                username.to_string(),
                format!("{username}@example.com"),
                "password123".to_string(),
                false,
            )
            .await
            .expect("Failed to add user");

        let token = ctx.token_service.generate_jwt(&user.id).unwrap();
        (user.id, BearerAuth(Bearer { token }))
    }

    #[tokio::test]
    async fn test_dashboard_returns_identity() {
        let ctx = setup().await;
        let (_id, auth) = signed_in_user(&ctx, "alice").await;

        let response = ctx.api.dashboard(auth).await.expect("Dashboard failed");
        assert_eq!(response.username, "alice");
        assert_eq!(response.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_profile_returns_full_account() {
        let ctx = setup().await;
        let (user_id, auth) = signed_in_user(&ctx, "alice").await;

        let response = ctx.api.profile(auth).await.expect("Profile failed");
        assert_eq!(response.user_id, user_id);
        assert_eq!(response.username, "alice");
        assert!(!response.is_admin);
        assert!(response.created_at > 0);
    }

    #[tokio::test]
    async fn test_endpoints_reject_invalid_token() {
        let ctx = setup().await;
        let auth = BearerAuth(Bearer {
            token: "garbage".to_string(),
        });

        assert!(ctx.api.dashboard(auth).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_account_purges_board_reviews() {
        let ctx = setup().await;
        let (user_id, auth) = signed_in_user(&ctx, "alice").await;

        ctx.review_board.add_review("g1", "alice", "mine").unwrap();

        ctx.api
            .delete_account(auth)
            .await
            .expect("Account deletion failed");

        assert!(ctx
            .credential_store
            .find_by_id(&user_id)
            .await
            .expect("Query failed")
            .is_none());
        assert!(ctx.review_board.reviews_for("g1").is_empty());
    }

    #[tokio::test]
    async fn test_token_for_deleted_account_is_rejected() {
        let ctx = setup().await;
        let (_id, auth) = signed_in_user(&ctx, "alice").await;
        let token = auth.0.token.clone();

        ctx.api
            .delete_account(auth)
            .await
            .expect("Account deletion failed");

        // The still-valid JWT no longer resolves to an account
        let result = ctx
            .api
            .dashboard(BearerAuth(Bearer { token }))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }
}
