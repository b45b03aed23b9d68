use crate::errors::auth::AuthError;
use crate::types::db::refresh_token::{self, Entity as RefreshToken};
use crate::types::db::user::{self, ActiveModel, Entity as User};
use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher,
    PasswordVerifier, Version,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

/// CredentialStore manages user accounts and refresh tokens in the database
pub struct CredentialStore {
    db: DatabaseConnection,
    password_pepper: String,
}

impl CredentialStore {
    /// Create a new CredentialStore with the given database connection and password pepper
    pub fn new(db: DatabaseConnection, password_pepper: String) -> Self {
        Self {
            db,
            password_pepper,
        }
    }

    fn argon2(&self) -> Result<Argon2<'_>, AuthError> {
        Argon2::new_with_secret(
            self.password_pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| AuthError::internal_error(format!("Failed to initialize Argon2: {}", e)))
    }

    /// Register a new user
    ///
    /// Uniqueness is checked up front so callers get a specific error, with
    /// the database unique constraints as the backstop under races.
    pub async fn add_user(
        &self,
        username: String,
        email: String,
        password: String,
        is_admin: bool,
    ) -> Result<user::Model, AuthError> {
        let existing_email = User::find()
            .filter(user::Column::Email.eq(&email))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;
        if existing_email.is_some() {
            return Err(AuthError::duplicate_email());
        }

        let existing_username = User::find()
            .filter(user::Column::Username.eq(&username))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;
        if existing_username.is_some() {
            return Err(AuthError::duplicate_username());
        }

        let user_id = Uuid::new_v4().to_string();

        // Argon2id with the pepper as secret parameter
        let salt = SaltString::generate(&mut rand_core::OsRng);
        let password_hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::internal_error(format!("Password hashing error: {}", e)))?
            .to_string();

        let created_at = Utc::now().timestamp();

        let new_user = ActiveModel {
            id: Set(user_id),
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            is_admin: Set(is_admin),
            created_at: Set(created_at),
        };

        let inserted = new_user.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                AuthError::duplicate_email()
            } else {
                AuthError::internal_error(format!("Database error: {}", e))
            }
        })?;

        Ok(inserted)
    }

    /// Verify login credentials and return the user on success
    ///
    /// Login is by email. Missing account and wrong password both collapse
    /// into InvalidCredentials.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<user::Model, AuthError> {
        let user = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|_| AuthError::invalid_credentials())?
            .ok_or_else(AuthError::invalid_credentials)?;

        let parsed_hash =
            PasswordHash::new(&user.password_hash).map_err(|_| AuthError::invalid_credentials())?;

        self.argon2()
            .map_err(|_| AuthError::invalid_credentials())?
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::invalid_credentials())?;

        Ok(user)
    }

    /// Look up a user by id
    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<user::Model>, AuthError> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))
    }

    /// Delete a user account
    ///
    /// Refresh tokens and moderated reviews follow via foreign key cascade.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), AuthError> {
        User::delete_by_id(user_id)
            .exec(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Failed to delete user: {}", e)))?;
        Ok(())
    }

    /// Store a refresh token hash in the database
    pub async fn store_refresh_token(
        &self,
        token_hash: String,
        user_id: String,
        expires_at: i64,
    ) -> Result<(), AuthError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AuthError::internal_error(format!("Failed to start transaction: {}", e)))?;

        let created_at = Utc::now().timestamp();

        let new_token = refresh_token::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            token_hash: Set(token_hash),
            user_id: Set(user_id),
            expires_at: Set(expires_at),
            created_at: Set(created_at),
        };

        new_token
            .insert(&txn)
            .await
            .map_err(|e| AuthError::internal_error(format!("Failed to store refresh token: {}", e)))?;

        txn.commit()
            .await
            .map_err(|e| AuthError::internal_error(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    /// Validate a refresh token hash and return the associated user_id
    pub async fn validate_refresh_token(&self, token_hash: &str) -> Result<String, AuthError> {
        let token = RefreshToken::find()
            .filter(refresh_token::Column::TokenHash.eq(token_hash))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?
            .ok_or_else(AuthError::invalid_refresh_token)?;

        let now = Utc::now().timestamp();
        if token.expires_at < now {
            return Err(AuthError::expired_refresh_token());
        }

        Ok(token.user_id)
    }

    /// Revoke a refresh token belonging to the given user
    ///
    /// Scoped by user_id so one account cannot revoke another's session.
    /// Succeeds whether or not the token existed; logout is idempotent.
    pub async fn revoke_refresh_token(
        &self,
        token_hash: &str,
        user_id: &str,
    ) -> Result<(), AuthError> {
        RefreshToken::delete_many()
            .filter(refresh_token::Column::TokenHash.eq(token_hash))
            .filter(refresh_token::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Failed to revoke refresh token: {}", e)))?;
        Ok(())
    }

    /// Create the admin account if no account with this email exists
    ///
    /// Safe to run on every startup.
    pub async fn ensure_admin_seed(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<(), AuthError> {
        let existing = User::find()
            .filter(user::Column::Email.eq(&email))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        if existing.is_none() {
            self.add_user(username, email, password, true).await?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("db", &"<connection>")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Display for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CredentialStore {{ db: <connection>, password_pepper: <redacted> }}")
    }
}
