use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::services::{validate_token, JwtKeys};
use crate::{error::ApiError, state::AppState};

/// Validates the `token` header, yielding the authenticated email.
pub struct AuthUser(pub String);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let claims = validate_token(&parts.headers, &keys, state.credentials.as_ref())
            .await
            .map_err(|e| {
                warn!(error = %e, "token rejected");
                ApiError::from(e)
            })?;
        Ok(AuthUser(claims.email))
    }
}
