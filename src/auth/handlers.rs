use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{dto::User, services::JwtKeys},
    error::ApiError,
    response::ApiResponse,
    state::AppState,
};

pub fn token_routes() -> Router<AppState> {
    Router::new().route("/createtoken", post(create_token))
}

/// Issue a signed token for the posted credential pair.
#[utoipa::path(
    post,
    path = "/createtoken",
    tag = "auth",
    request_body = User,
    responses(
        (status = 200, description = "Signed token", body = String),
        (status = 400, description = "Malformed body", body = ApiResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_token(
    State(state): State<AppState>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<Json<String>, ApiError> {
    let Json(user) = payload?;
    let keys = JwtKeys::from_ref(&state);
    let token = keys.create_token(&user)?;
    info!(email = %user.email, "token issued");
    Ok(Json(token))
}
