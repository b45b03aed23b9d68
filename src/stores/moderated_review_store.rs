use crate::errors::admin::AdminError;
use crate::types::db::moderated_review::{self, Entity as ModeratedReview};
use crate::types::db::user;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

pub const RATING_MIN: i32 = 1;
pub const RATING_MAX: i32 = 5;

/// ModeratedReviewStore manages the persisted, admin-curated reviews
pub struct ModeratedReviewStore {
    db: DatabaseConnection,
}

impl ModeratedReviewStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn check_rating(rating: i32) -> Result<(), AdminError> {
        if (RATING_MIN..=RATING_MAX).contains(&rating) {
            Ok(())
        } else {
            Err(AdminError::invalid_rating())
        }
    }

    /// Insert a moderated review
    pub async fn create(
        &self,
        content: String,
        rating: i32,
        author_id: String,
    ) -> Result<moderated_review::Model, AdminError> {
        Self::check_rating(rating)?;

        let new_review = moderated_review::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            content: Set(content),
            rating: Set(rating),
            date_posted: Set(Utc::now().timestamp()),
            author_id: Set(author_id),
        };

        new_review
            .insert(&self.db)
            .await
            .map_err(|e| AdminError::internal_error(format!("Failed to insert review: {}", e)))
    }

    /// All moderated reviews with their authors, newest first
    pub async fn list_all_desc(
        &self,
    ) -> Result<Vec<(moderated_review::Model, Option<user::Model>)>, AdminError> {
        ModeratedReview::find()
            .find_also_related(user::Entity)
            .order_by_desc(moderated_review::Column::DatePosted)
            .all(&self.db)
            .await
            .map_err(|e| AdminError::internal_error(format!("Failed to list reviews: {}", e)))
    }

    /// Replace the content and rating of a moderated review
    pub async fn update(
        &self,
        id: i32,
        content: String,
        rating: i32,
    ) -> Result<moderated_review::Model, AdminError> {
        Self::check_rating(rating)?;

        let review = ModeratedReview::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AdminError::internal_error(format!("Database error: {}", e)))?
            .ok_or_else(|| AdminError::not_found(id))?;

        let mut active: moderated_review::ActiveModel = review.into();
        active.content = Set(content);
        active.rating = Set(rating);

        active
            .update(&self.db)
            .await
            .map_err(|e| AdminError::internal_error(format!("Failed to update review: {}", e)))
    }

    /// Delete a moderated review by id
    pub async fn delete(&self, id: i32) -> Result<(), AdminError> {
        let result = ModeratedReview::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AdminError::internal_error(format!("Failed to delete review: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(AdminError::not_found(id));
        }
        Ok(())
    }

    /// Number of moderated reviews
    pub async fn count(&self) -> Result<u64, AdminError> {
        ModeratedReview::find()
            .count(&self.db)
            .await
            .map_err(|e| AdminError::internal_error(format!("Failed to count reviews: {}", e)))
    }
}

impl std::fmt::Debug for ModeratedReviewStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeratedReviewStore")
            .field("db", &"<connection>")
            .finish()
    }
}
