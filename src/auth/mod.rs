use crate::state::AppState;
use axum::Router;

mod claims;
pub mod credentials;
mod dto;
mod error;
pub(crate) mod extractors;
pub mod handlers;
pub mod password;
pub mod services;

pub use claims::Claims;
pub use credentials::{Credential, CredentialStore, StaticCredentials};
pub use dto::User;
pub use error::AuthError;
pub use extractors::AuthUser;
pub use services::{validate_token, JwtKeys, TOKEN_HEADER};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::token_routes())
}
