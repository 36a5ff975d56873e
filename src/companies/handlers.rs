use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{dto::CompanyPayload, repo_types::Company};
use crate::{
    auth::AuthUser,
    error::ApiError,
    response::{ApiResponse, CreateResponse},
    state::AppState,
};

pub fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/companies", post(create_company).get(list_companies))
        .route(
            "/companies/:id",
            get(get_company).patch(patch_company).delete(delete_company),
        )
}

#[utoipa::path(
    post,
    path = "/companies",
    tag = "companies",
    request_body = CompanyPayload,
    security(("token" = [])),
    responses(
        (status = 201, description = "Company inserted", body = CreateResponse),
        (status = 400, description = "Invalid token, missing fields or duplicate name", body = ApiResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_company(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    payload: Result<Json<CompanyPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateResponse>), ApiError> {
    let Json(payload) = payload?;
    let fields = payload.validate_new().map_err(|e| {
        warn!(error = %e, "company rejected");
        e
    })?;

    if state.store.count_by_name(&fields.name).await? > 0 {
        warn!(name = %fields.name, "company name already taken");
        return Err(ApiError::Uniqueness);
    }

    let id = state.store.create_company(&fields).await?;
    info!(%id, %email, "company created");
    Ok((
        StatusCode::CREATED,
        Json(CreateResponse {
            id,
            code: StatusCode::CREATED.as_u16(),
            message: "Company inserted".into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/companies",
    tag = "companies",
    responses(
        (status = 200, description = "All companies", body = [Company])
    )
)]
#[instrument(skip(state))]
pub async fn list_companies(State(state): State<AppState>) -> Result<Json<Vec<Company>>, ApiError> {
    Ok(Json(state.store.list_companies().await?))
}

#[utoipa::path(
    get,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = Uuid, Path, description = "Company id")),
    responses(
        (status = 200, description = "The company", body = Company),
        (status = 400, description = "Malformed id", body = ApiResponse),
        (status = 404, description = "Company not found", body = ApiResponse)
    )
)]
#[instrument(skip(state, id))]
pub async fn get_company(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Company>, ApiError> {
    let Path(id) = id?;
    let company = state.store.get_company(id).await?;
    Ok(Json(company))
}

#[utoipa::path(
    patch,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = Uuid, Path, description = "Company id")),
    request_body = CompanyPayload,
    security(("token" = [])),
    responses(
        (status = 200, description = "Updated", body = ApiResponse),
        (status = 400, description = "Invalid token, id or body", body = ApiResponse),
        (status = 404, description = "Company not found", body = ApiResponse)
    )
)]
#[instrument(skip(state, id, payload))]
pub async fn patch_company(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<CompanyPayload>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let fields = payload.into_fields()?;

    state.store.patch_company(id, &fields).await?;
    info!(%id, %email, "company updated");
    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "Updated Successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = Uuid, Path, description = "Company id")),
    security(("token" = [])),
    responses(
        (status = 200, description = "Deleted", body = ApiResponse),
        (status = 400, description = "Invalid token or id", body = ApiResponse),
        (status = 404, description = "Company not found", body = ApiResponse)
    )
)]
#[instrument(skip(state, id))]
pub async fn delete_company(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Path(id) = id?;
    state.store.get_company(id).await?;
    state.store.delete_company(id).await?;
    info!(%id, %email, "company deleted");
    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "Deleted Successfully",
    )))
}
