use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token not provided")]
    EmptyToken,

    #[error("couldn't find secret key")]
    Config,

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("token error")]
    InvalidToken,

    #[error("user not authenticated")]
    Authentication,
}
