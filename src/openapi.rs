//! OpenAPI document for the company API. Swagger UI is mounted at `/docs`
//! and reads the document from `/docs/openapi.json`.

use axum::Router;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::User,
    companies::{
        dto::CompanyPayload,
        repo_types::{Company, CompanyType},
    },
    response::{ApiResponse, CreateResponse},
    state::AppState,
};

/// Registers the `token` header scheme used by the write endpoints.
struct TokenHeaderAddon;

impl Modify for TokenHeaderAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "token",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "token",
                "Signed token issued by POST /createtoken.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&TokenHeaderAddon),
    info(
        title = "Company service API",
        description = "Create, read, update and delete company records."
    ),
    paths(
        crate::auth::handlers::create_token,
        crate::companies::handlers::create_company,
        crate::companies::handlers::list_companies,
        crate::companies::handlers::get_company,
        crate::companies::handlers::patch_company,
        crate::companies::handlers::delete_company,
    ),
    components(schemas(
        Company,
        CompanyType,
        CompanyPayload,
        User,
        ApiResponse,
        CreateResponse
    )),
    tags(
        (name = "companies", description = "Company records"),
        (name = "auth", description = "Token issuance")
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().merge(SwaggerUi::new("/docs").url("/docs/openapi.json", ApiDoc::openapi()))
}
