use crate::errors::auth::AuthError;
use crate::services::token_service::TokenService;
use crate::stores::CredentialStore;
use crate::types::db::user;

/// Resolve the account behind an access token
///
/// A valid JWT whose subject no longer exists (account deleted after the
/// token was issued) counts as an invalid token.
pub async fn current_user(
    token: &str,
    token_service: &TokenService,
    credential_store: &CredentialStore,
) -> Result<user::Model, AuthError> {
    let claims = token_service.validate_jwt(token)?;
    credential_store
        .find_by_id(&claims.sub)
        .await?
        .ok_or_else(AuthError::invalid_token)
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .or_else(|| header_value.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_strips_scheme() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
    }

    #[test]
    fn bearer_token_rejects_other_schemes() {
        assert_eq!(bearer_token("Basic dXNlcg=="), None);
        assert_eq!(bearer_token("abc.def.ghi"), None);
        assert_eq!(bearer_token("Bearer "), None);
    }
}
