use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for token creation.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(default)]
pub struct User {
    pub email: String,
    pub password: String,
}
