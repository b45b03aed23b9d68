use crate::access;
use crate::api::auth::BearerAuth;
use crate::api::helpers::current_user;
use crate::errors::admin::AdminError;
use crate::services::token_service::TokenService;
use crate::stores::{CredentialStore, ModeratedReviewStore};
use crate::types::db::user;
use crate::types::dto::admin::{
    ModeratedReviewListResponse, ModeratedReviewView, UpdateReviewRequest,
};
use crate::types::dto::common::MessageResponse;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

/// API tags for admin endpoints
#[derive(Tags)]
enum AdminTags {
    /// Moderation endpoints, admin only
    Admin,
}

/// Admin moderation API endpoints
pub struct AdminApi {
    credential_store: Arc<CredentialStore>,
    token_service: Arc<TokenService>,
    moderated_review_store: Arc<ModeratedReviewStore>,
}

impl AdminApi {
    pub fn new(
        credential_store: Arc<CredentialStore>,
        token_service: Arc<TokenService>,
        moderated_review_store: Arc<ModeratedReviewStore>,
    ) -> Self {
        Self {
            credential_store,
            token_service,
            moderated_review_store,
        }
    }

    /// Resolve the caller and require the admin flag
    async fn require_admin(&self, token: &str) -> Result<user::Model, AdminError> {
        let user = current_user(token, &self.token_service, &self.credential_store).await?;
        access::ensure_admin(&user)?;
        Ok(user)
    }
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// List all moderated reviews, newest first
    #[oai(path = "/reviews", method = "get", tag = "AdminTags::Admin")]
    pub async fn list_reviews(
        &self,
        auth: BearerAuth,
    ) -> Result<Json<ModeratedReviewListResponse>, AdminError> {
        self.require_admin(&auth.0.token).await?;

        let reviews = self
            .moderated_review_store
            .list_all_desc()
            .await?
            .into_iter()
            .map(|(review, author)| ModeratedReviewView {
                id: review.id,
                content: review.content,
                rating: review.rating,
                date_posted: review.date_posted,
                author: author.map(|user| user.username),
            })
            .collect();

        Ok(Json(ModeratedReviewListResponse { reviews }))
    }

    /// Replace the content and rating of a moderated review
    #[oai(path = "/reviews/:id", method = "put", tag = "AdminTags::Admin")]
    pub async fn update_review(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<UpdateReviewRequest>,
    ) -> Result<Json<MessageResponse>, AdminError> {
        let admin = self.require_admin(&auth.0.token).await?;

        self.moderated_review_store
            .update(id.0, body.0.content, body.0.rating)
            .await?;

        tracing::info!(admin = %admin.username, review_id = id.0, "moderated review updated");
        Ok(Json(MessageResponse {
            message: "Review updated".to_string(),
        }))
    }

    /// Delete a moderated review
    #[oai(path = "/reviews/:id", method = "delete", tag = "AdminTags::Admin")]
    pub async fn delete_review(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, AdminError> {
        let admin = self.require_admin(&auth.0.token).await?;

        self.moderated_review_store.delete(id.0).await?;

        tracing::info!(admin = %admin.username, review_id = id.0, "moderated review deleted");
        Ok(Json(MessageResponse {
            message: "Review deleted".to_string(),
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
        api: AdminApi,
        credential_store: Arc<CredentialStore>,
        token_service: Arc<TokenService>,
        moderated_review_store: Arc<ModeratedReviewStore>,
    }

    async fn setup() -> TestContext {
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
        let moderated_review_store = Arc::new(ModeratedReviewStore::new(db));

        let api = AdminApi::new(
            credential_store.clone(),
            token_service.clone(),
            moderated_review_store.clone(),
        );

        TestContext {
            api,
            credential_store,
            token_service,
            moderated_review_store,
        }
    }

    async fn signed_in_user(ctx: &TestContext, username: &str, is_admin: bool) -> (String, BearerAuth) {
        let user = ctx
            .credential_store
            .add_user(
                username.to_string(),
                format!("{username}@example.com"),
                "password123".to_string(),
                is_admin,
            )
            .await
            .expect("Failed to add user");

        let token = ctx.token_service.generate_jwt(&user.id).unwrap();
        (user.id, BearerAuth(Bearer { token }))
    }

    #[tokio::test]
    async fn test_non_admin_gets_uniform_403() {
        let ctx = setup().await;
        let (author_id, user_auth) = signed_in_user(&ctx, "alice", false).await;

        let review = ctx
            .moderated_review_store
            .create("content".to_string(), 3, author_id)
            .await
            .expect("Failed to seed review");

        let list = ctx
            .api
            .list_reviews(BearerAuth(Bearer {
                token: user_auth.0.token.clone(),
            }))
            .await;
        assert!(matches!(list, Err(AdminError::Forbidden(_))));

        let update = ctx
            .api
            .update_review(
                BearerAuth(Bearer {
                    token: user_auth.0.token.clone(),
                }),
                Path(review.id),
                Json(UpdateReviewRequest {
                    content: "hacked".to_string(),
                    rating: 1,
                }),
            )
            .await;
        assert!(matches!(update, Err(AdminError::Forbidden(_))));

        let delete = ctx
            .api
            .delete_review(user_auth, Path(review.id))
            .await;
        assert!(matches!(delete, Err(AdminError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_admin_lists_reviews_with_authors() {
        let ctx = setup().await;
        let (author_id, _user_auth) = signed_in_user(&ctx, "alice", false).await;
        let (_admin_id, admin_auth) = signed_in_user(&ctx, "root", true).await;

        ctx.moderated_review_store
            .create("great game".to_string(), 5, author_id)
            .await
            .expect("Failed to seed review");

        let response = ctx
            .api
            .list_reviews(admin_auth)
            .await
            .expect("List failed");
        assert_eq!(response.reviews.len(), 1);
        assert_eq!(response.reviews[0].content, "great game");
        assert_eq!(response.reviews[0].author.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_admin_update_and_delete() {
        let ctx = setup().await;
        let (author_id, _user_auth) = signed_in_user(&ctx, "alice", false).await;
        let (_admin_id, admin_auth) = signed_in_user(&ctx, "root", true).await;
        let admin_token = admin_auth.0.token.clone();

        let review = ctx
            .moderated_review_store
            .create("rough draft".to_string(), 2, author_id)
            .await
            .expect("Failed to seed review");

        ctx.api
            .update_review(
                admin_auth,
                Path(review.id),
                Json(UpdateReviewRequest {
                    content: "cleaned up".to_string(),
                    rating: 4,
                }),
            )
            .await
            .expect("Update failed");

        ctx.api
            .delete_review(BearerAuth(Bearer { token: admin_token }), Path(review.id))
            .await
            .expect("Delete failed");

        assert_eq!(
            ctx.moderated_review_store.count().await.expect("count"),
            0
        );
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_404_and_store_unchanged() {
        let ctx = setup().await;
        let (author_id, _user_auth) = signed_in_user(&ctx, "alice", false).await;
        let (_admin_id, admin_auth) = signed_in_user(&ctx, "root", true).await;

        ctx.moderated_review_store
            .create("kept".to_string(), 3, author_id)
            .await
            .expect("Failed to seed review");

        let result = ctx.api.delete_review(admin_auth, Path(9999)).await;
        assert!(matches!(result, Err(AdminError::NotFound(_))));
        assert_eq!(
            ctx.moderated_review_store.count().await.expect("count"),
            1
        );
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_rating() {
        let ctx = setup().await;
        let (author_id, _user_auth) = signed_in_user(&ctx, "alice", false).await;
        let (_admin_id, admin_auth) = signed_in_user(&ctx, "root", true).await;

        let review = ctx
            .moderated_review_store
            .create("content".to_string(), 3, author_id)
            .await
            .expect("Failed to seed review");

        let result = ctx
            .api
            .update_review(
                admin_auth,
                Path(review.id),
                Json(UpdateReviewRequest {
                    content: "content".to_string(),
                    rating: 6,
                }),
            )
            .await;
        assert!(matches!(result, Err(AdminError::InvalidRating(_))));
    }
}
