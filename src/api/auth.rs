use crate::api::helpers::current_user;
use crate::errors::auth::AuthError;
use crate::services::token_service::TokenService;
use crate::stores::CredentialStore;
use crate::types::db::user;
use crate::types::dto::auth::{
    LoginRequest, LogoutRequest, RefreshRequest, RefreshResponse, RegisterRequest, TokenResponse,
};
use crate::types::dto::common::MessageResponse;
use poem_openapi::{auth::Bearer, payload::Json, OpenApi, SecurityScheme, Tags};
use std::sync::Arc;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 30;
const PASSWORD_MIN: usize = 6;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

/// Authentication API endpoints
pub struct AuthApi {
    credential_store: Arc<CredentialStore>,
    token_service: Arc<TokenService>,
}

impl AuthApi {
    pub fn new(credential_store: Arc<CredentialStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            credential_store,
            token_service,
        }
    }

    fn validate_registration(request: &RegisterRequest) -> Result<(), AuthError> {
        let username = request.username.trim();
        if username.chars().count() < USERNAME_MIN || username.chars().count() > USERNAME_MAX {
            return Err(AuthError::validation_failed(format!(
                "Username must be between {USERNAME_MIN} and {USERNAME_MAX} characters"
            )));
        }

        let email = request.email.trim();
        if email.is_empty() || !email.contains('@') || email.contains(char::is_whitespace) {
            return Err(AuthError::validation_failed("Invalid email address"));
        }

        if request.password.chars().count() < PASSWORD_MIN {
            return Err(AuthError::validation_failed(format!(
                "Password must be at least {PASSWORD_MIN} characters"
            )));
        }

        Ok(())
    }

    /// Issue an access token and a stored refresh token for a user
    async fn issue_tokens(&self, user: &user::Model) -> Result<TokenResponse, AuthError> {
        let access_token = self.token_service.generate_jwt(&user.id)?;

        let refresh_token = self.token_service.generate_refresh_token();
        let token_hash = self.token_service.hash_refresh_token(&refresh_token);
        let expires_at = self.token_service.refresh_expiration();
        self.credential_store
            .store_refresh_token(token_hash, user.id.clone(), expires_at)
            .await?;

        Ok(TokenResponse {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_service.jwt_expiration_seconds(),
        })
    }
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register a new account and receive authentication tokens
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    pub async fn register(
        &self,
        body: Json<RegisterRequest>,
    ) -> Result<Json<TokenResponse>, AuthError> {
        Self::validate_registration(&body)?;

        let user = self
            .credential_store
            .add_user(
                body.username.trim().to_string(),
                body.email.trim().to_string(),
                body.0.password,
                false,
            )
            .await?;

        tracing::info!(username = %user.username, "account registered");
        Ok(Json(self.issue_tokens(&user).await?))
    }

    /// Login with email and password to receive authentication tokens
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    pub async fn login(&self, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, AuthError> {
        let user = self
            .credential_store
            .verify_credentials(&body.email, &body.password)
            .await?;

        Ok(Json(self.issue_tokens(&user).await?))
    }

    /// Refresh the access token using a refresh token
    #[oai(path = "/refresh", method = "post", tag = "AuthTags::Authentication")]
    pub async fn refresh(
        &self,
        body: Json<RefreshRequest>,
    ) -> Result<Json<RefreshResponse>, AuthError> {
        let token_hash = self.token_service.hash_refresh_token(&body.refresh_token);
        let user_id = self
            .credential_store
            .validate_refresh_token(&token_hash)
            .await?;

        let access_token = self.token_service.generate_jwt(&user_id)?;

        Ok(Json(RefreshResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_service.jwt_expiration_seconds(),
        }))
    }

    /// Logout and revoke the refresh token
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    pub async fn logout(
        &self,
        auth: BearerAuth,
        body: Json<LogoutRequest>,
    ) -> Result<Json<MessageResponse>, AuthError> {
        let user = current_user(&auth.0.token, &self.token_service, &self.credential_store).await?;

        let token_hash = self.token_service.hash_refresh_token(&body.refresh_token);
        // Scoped to the caller; revoking someone else's token is a no-op
        self.credential_store
            .revoke_refresh_token(&token_hash, &user.id)
            .await?;

        Ok(Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter};

    async fn setup_test_api() -> (DatabaseConnection, AuthApi) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let credential_store = Arc::new(CredentialStore::new(
            db.clone(),
            "test-pepper-for-api-tests".to_string(),
        ));
        let token_service = Arc::new(TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
            "test-refresh-secret-minimum-32-chars".to_string(),
        ));

        (db, AuthApi::new(credential_store, token_service))
    }

    fn register_request(username: &str, email: &str, password: &str) -> Json<RegisterRequest> {
        Json(RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    #[tokio::test]
    async fn test_register_then_login_returns_same_identity() {
        let (_db, api) = setup_test_api().await;

        let register_response = api
            .register(register_request("alice", "alice@example.com", "secret123"))
            .await
            .expect("Registration failed");
        assert_eq!(register_response.token_type, "Bearer");
        assert_eq!(register_response.expires_in, 900);

        let login_response = api
            .login(Json(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "secret123".to_string(),
            }))
            .await
            .expect("Login failed");

        // Both tokens must resolve to the same subject
        let register_claims = api
            .token_service
            .validate_jwt(&register_response.access_token)
            .unwrap();
        let login_claims = api
            .token_service
            .validate_jwt(&login_response.access_token)
            .unwrap();
        assert_eq!(register_claims.sub, login_claims.sub);
    }

    #[tokio::test]
    async fn test_register_rejects_short_username() {
        let (_db, api) = setup_test_api().await;

        let result = api
            .register(register_request("ab", "ab@example.com", "secret123"))
            .await;
        assert!(matches!(result, Err(AuthError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let (_db, api) = setup_test_api().await;

        let result = api
            .register(register_request("alice", "alice@example.com", "12345"))
            .await;
        assert!(matches!(result, Err(AuthError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_email() {
        let (_db, api) = setup_test_api().await;

        for email in ["not-an-email", "", "has spaces@example.com"] {
            let result = api.register(register_request("alice", email, "secret123")).await;
            assert!(
                matches!(result, Err(AuthError::ValidationFailed(_))),
                "email {email:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let (_db, api) = setup_test_api().await;

        api.register(register_request("alice", "alice@example.com", "secret123"))
            .await
            .expect("First registration failed");

        let result = api
            .register(register_request("alice2", "alice@example.com", "secret456"))
            .await;
        assert!(matches!(result, Err(AuthError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_fails() {
        let (_db, api) = setup_test_api().await;

        api.register(register_request("alice", "alice@example.com", "secret123"))
            .await
            .expect("Registration failed");

        let result = api
            .login(Json(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "wrong".to_string(),
            }))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
    }

    #[tokio::test]
    async fn test_refresh_returns_new_access_token() {
        let (_db, api) = setup_test_api().await;

        let tokens = api
            .register(register_request("alice", "alice@example.com", "secret123"))
            .await
            .expect("Registration failed");

        let refresh_response = api
            .refresh(Json(RefreshRequest {
                refresh_token: tokens.refresh_token.clone(),
            }))
            .await
            .expect("Refresh failed");

        assert!(!refresh_response.access_token.is_empty());
        let claims = api
            .token_service
            .validate_jwt(&refresh_response.access_token)
            .unwrap();
        let original = api.token_service.validate_jwt(&tokens.access_token).unwrap();
        assert_eq!(claims.sub, original.sub);
    }

    #[tokio::test]
    async fn test_refresh_fails_after_logout() {
        let (_db, api) = setup_test_api().await;

        let tokens = api
            .register(register_request("alice", "alice@example.com", "secret123"))
            .await
            .expect("Registration failed");

        let auth = BearerAuth(Bearer {
            token: tokens.access_token.clone(),
        });
        api.logout(
            auth,
            Json(LogoutRequest {
                refresh_token: tokens.refresh_token.clone(),
            }),
        )
        .await
        .expect("Logout failed");

        let result = api
            .refresh(Json(RefreshRequest {
                refresh_token: tokens.refresh_token.clone(),
            }))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidRefreshToken(_))));
    }

    #[tokio::test]
    async fn test_logout_cannot_revoke_another_users_token() {
        let (db, api) = setup_test_api().await;

        let alice = api
            .register(register_request("alice", "alice@example.com", "secret123"))
            .await
            .expect("Registration failed");
        let bob = api
            .register(register_request("bob", "bob@example.com", "secret456"))
            .await
            .expect("Registration failed");

        // Alice tries to revoke Bob's refresh token
        let auth = BearerAuth(Bearer {
            token: alice.access_token.clone(),
        });
        api.logout(
            auth,
            Json(LogoutRequest {
                refresh_token: bob.refresh_token.clone(),
            }),
        )
        .await
        .expect("Logout should not error");

        // Bob's token survives
        let token_hash = api.token_service.hash_refresh_token(&bob.refresh_token);
        use crate::types::db::refresh_token::{Column, Entity as RefreshToken};
        let stored = RefreshToken::find()
            .filter(Column::TokenHash.eq(&token_hash))
            .one(&db)
            .await
            .expect("Query failed");
        assert!(stored.is_some());
    }
}
