//! Ownership and admin access checks.
//!
//! Every mutation of someone's review funnels through these helpers so the
//! owner-or-admin rule lives in exactly one place.

use crate::errors::admin::AdminError;
use crate::types::db::user;

/// The identity a request acts as, resolved from its access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub username: String,
    pub is_admin: bool,
}

impl Actor {
    pub fn from_user(user: &user::Model) -> Self {
        Actor {
            username: user.username.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// Whether `actor` may edit or delete a review owned by `owner_username`
pub fn can_mutate(actor: &Actor, owner_username: &str) -> bool {
    actor.is_admin || actor.username == owner_username
}

/// Gate for admin-only endpoints
pub fn ensure_admin(user: &user::Model) -> Result<(), AdminError> {
    if user.is_admin {
        Ok(())
    } else {
        Err(AdminError::forbidden())
    }
}
