use crate::access::Actor;
use crate::api::auth::BearerAuth;
use crate::api::helpers::{bearer_token, current_user};
use crate::catalog;
use crate::errors::review::GameReviewError;
use crate::services::aggregator::ReviewAggregator;
use crate::services::token_service::TokenService;
use crate::stores::{CredentialStore, ReviewBoard};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::games::{
    AddReviewRequest, BoardReviewView, EditReviewRequest, GameDetailResponse, GameListResponse,
    GameSummary,
};
use poem_openapi::{
    param::{Header, Path, Query},
    payload::Json,
    OpenApi, Tags,
};
use std::sync::Arc;

/// API tags for game endpoints
#[derive(Tags)]
enum GameTags {
    /// Game catalog and review endpoints
    Games,
}

/// Game catalog and review API endpoints
pub struct GamesApi {
    credential_store: Arc<CredentialStore>,
    token_service: Arc<TokenService>,
    review_board: Arc<ReviewBoard>,
    aggregator: Arc<ReviewAggregator>,
}

impl GamesApi {
    pub fn new(
        credential_store: Arc<CredentialStore>,
        token_service: Arc<TokenService>,
        review_board: Arc<ReviewBoard>,
        aggregator: Arc<ReviewAggregator>,
    ) -> Self {
        Self {
            credential_store,
            token_service,
            review_board,
            aggregator,
        }
    }

    /// Resolve the caller as a board actor
    async fn actor(&self, token: &str) -> Result<Actor, GameReviewError> {
        let user = current_user(token, &self.token_service, &self.credential_store).await?;
        Ok(Actor::from_user(&user))
    }
}

#[OpenApi(prefix_path = "/games")]
impl GamesApi {
    /// List the game catalog, optionally filtered by a search query
    #[oai(path = "/", method = "get", tag = "GameTags::Games")]
    pub async fn list(&self, query: Query<Option<String>>) -> Json<GameListResponse> {
        let games = catalog::search(query.as_deref().unwrap_or(""))
            .into_iter()
            .map(|game| GameSummary {
                id: game.id.to_string(),
                name: game.name.to_string(),
                image_url: catalog::image_url(game.id),
            })
            .collect();

        Json(GameListResponse { games })
    }

    /// Detail page data for one game
    ///
    /// Public; a Bearer token is optional and only affects `has_reviewed`.
    /// External aggregation failures degrade to 0% / no samples.
    #[oai(path = "/:game_id", method = "get", tag = "GameTags::Games")]
    pub async fn detail(
        &self,
        game_id: Path<String>,
        authorization: Header<Option<String>>,
    ) -> Json<GameDetailResponse> {
        let game_id = game_id.0;

        let summary = self.aggregator.fetch_summary(&game_id).await;
        let sample_reviews = self.aggregator.fetch_samples(&game_id).await;

        let reviews: Vec<BoardReviewView> = self
            .review_board
            .reviews_for(&game_id)
            .into_iter()
            .map(|entry| BoardReviewView {
                username: entry.username,
                text: entry.text,
            })
            .collect();

        // Anonymous callers and bad tokens both read as "not reviewed"
        let mut has_reviewed = false;
        if let Some(token) = authorization.0.as_deref().and_then(bearer_token) {
            if let Ok(actor) = self.actor(token).await {
                has_reviewed = self.review_board.has_reviewed(&game_id, &actor.username);
            }
        }

        Json(GameDetailResponse {
            name: catalog::display_name(&game_id).to_string(),
            image_url: catalog::image_url(&game_id),
            positive_pct: summary.positive_pct,
            rating_color: summary.color,
            sample_reviews,
            reviews,
            has_reviewed,
            game_id,
        })
    }

    /// Post a review to a game's board
    #[oai(path = "/:game_id/reviews", method = "post", tag = "GameTags::Games")]
    pub async fn add_review(
        &self,
        auth: BearerAuth,
        game_id: Path<String>,
        body: Json<AddReviewRequest>,
    ) -> Result<Json<MessageResponse>, GameReviewError> {
        let actor = self.actor(&auth.0.token).await?;

        self.review_board
            .add_review(&game_id, &actor.username, &body.text)?;

        Ok(Json(MessageResponse {
            message: "Review added".to_string(),
        }))
    }

    /// Edit a board review owned by `username`
    ///
    /// The owner and admins may edit; anyone else gets 403.
    #[oai(
        path = "/:game_id/reviews/:username",
        method = "put",
        tag = "GameTags::Games"
    )]
    pub async fn edit_review(
        &self,
        auth: BearerAuth,
        game_id: Path<String>,
        username: Path<String>,
        body: Json<EditReviewRequest>,
    ) -> Result<Json<MessageResponse>, GameReviewError> {
        let actor = self.actor(&auth.0.token).await?;

        self.review_board
            .edit_review(&game_id, &username, &actor, &body.text)?;

        Ok(Json(MessageResponse {
            message: "Review updated".to_string(),
        }))
    }

    /// Delete board reviews owned by `username`
    #[oai(
        path = "/:game_id/reviews/:username",
        method = "delete",
        tag = "GameTags::Games"
    )]
    pub async fn delete_review(
        &self,
        auth: BearerAuth,
        game_id: Path<String>,
        username: Path<String>,
    ) -> Result<Json<MessageResponse>, GameReviewError> {
        let actor = self.actor(&auth.0.token).await?;

        let removed = self
            .review_board
            .delete_review(&game_id, &username, &actor)?;

        tracing::debug!(game_id = %game_id.0, owner = %username.0, removed, "board review deleted");
        Ok(Json(MessageResponse {
            message: "Review deleted".to_string(),
        }))
    }
}
