use axum::{extract::FromRef, http::HeaderMap};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, error, warn};

use super::{
    claims::Claims, credentials::CredentialStore, dto::User, error::AuthError,
    password::verify_password,
};
use crate::state::AppState;

/// Request header carrying the signed token.
pub const TOKEN_HEADER: &str = "token";

/// HMAC keys derived from the configured secret. Both are `None` when the
/// secret is empty, which makes every operation fail with [`AuthError::Config`].
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Option<EncodingKey>,
    decoding: Option<DecodingKey>,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::from_secret(&state.config.token.secret)
    }
}

impl JwtKeys {
    pub fn from_secret(secret: &str) -> Self {
        if secret.is_empty() {
            return Self {
                encoding: None,
                decoding: None,
            };
        }
        Self {
            encoding: Some(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Some(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation
    }

    /// Signs `{email, password}` with HS256.
    pub fn create_token(&self, user: &User) -> Result<String, AuthError> {
        let encoding = self.encoding.as_ref().ok_or_else(|| {
            error!("token secret is not configured");
            AuthError::Config
        })?;
        let claims = Claims {
            email: user.email.clone(),
            password: user.password.clone(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, encoding).map_err(|e| {
            error!(error = %e, "jwt sign failed");
            AuthError::Signing(e)
        })?;
        debug!(email = %claims.email, "jwt signed");
        Ok(token)
    }

    /// Verifies an HMAC signature (HS256/384/512) and returns the embedded claims.
    pub fn decrypt_token(&self, token: &str) -> Result<Claims, AuthError> {
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        let decoding = self.decoding.as_ref().ok_or_else(|| {
            error!("token secret is not configured");
            AuthError::Config
        })?;
        let data = decode::<Claims>(token, decoding, &Self::validation()).map_err(|e| {
            debug!(error = %e, "jwt rejected");
            AuthError::InvalidToken
        })?;
        Ok(data.claims)
    }
}

/// Reads the `token` header, verifies it, and authenticates the claims
/// against the credential store.
pub async fn validate_token(
    headers: &HeaderMap,
    keys: &JwtKeys,
    credentials: &dyn CredentialStore,
) -> Result<Claims, AuthError> {
    let token = headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let claims = keys.decrypt_token(token)?;

    let credential = match credentials.find_by_email(&claims.email).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            warn!(email = %claims.email, "token for unknown identity");
            return Err(AuthError::Authentication);
        }
        Err(e) => {
            error!(error = %e, "credential lookup failed");
            return Err(AuthError::Authentication);
        }
    };

    // argon2 is CPU bound; keep it off the async workers.
    let password = claims.password.clone();
    let verified =
        tokio::task::spawn_blocking(move || verify_password(&password, &credential.password_hash))
            .await
            .unwrap_or_else(|e| Err(anyhow::anyhow!("verify task failed: {e}")));

    match verified {
        Ok(true) => Ok(claims),
        Ok(false) => {
            warn!(email = %claims.email, "token password mismatch");
            Err(AuthError::Authentication)
        }
        Err(e) => {
            error!(error = %e, "verify_password failed");
            Err(AuthError::Authentication)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::StaticCredentials;
    use axum::http::HeaderValue;

    fn keys() -> JwtKeys {
        JwtKeys::from_secret("test-secret")
    }

    fn user(email: &str, password: &str) -> User {
        User {
            email: email.into(),
            password: password.into(),
        }
    }

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, HeaderValue::from_str(token).expect("header"));
        headers
    }

    #[test]
    fn create_and_decrypt_roundtrip() {
        let keys = keys();
        let token = keys.create_token(&user("abc@gmail.com", "root")).expect("sign");
        let claims = keys.decrypt_token(&token).expect("decrypt");
        assert_eq!(claims.email, "abc@gmail.com");
        assert_eq!(claims.password, "root");
    }

    #[test]
    fn payload_is_exactly_the_credential_pair() {
        let token = keys().create_token(&user("a@b.c", "pw")).expect("sign");
        let raw = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &JwtKeys::validation(),
        )
        .expect("decode");
        let obj = raw.claims.as_object().expect("object");
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("email") && obj.contains_key("password"));
    }

    #[test]
    fn decrypt_rejects_empty_token() {
        assert!(matches!(keys().decrypt_token(""), Err(AuthError::EmptyToken)));
    }

    #[test]
    fn decrypt_rejects_other_secret() {
        let token = JwtKeys::from_secret("other")
            .create_token(&user("abc@gmail.com", "root"))
            .expect("sign");
        assert!(matches!(keys().decrypt_token(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn decrypt_accepts_any_hmac_algorithm() {
        let claims = Claims {
            email: "abc@gmail.com".into(),
            password: "root".into(),
        };
        for alg in [Algorithm::HS384, Algorithm::HS512] {
            let token = encode(
                &Header::new(alg),
                &claims,
                &EncodingKey::from_secret(b"test-secret"),
            )
            .expect("sign");
            assert_eq!(keys().decrypt_token(&token).expect("decrypt"), claims);
        }
    }

    #[test]
    fn decrypt_rejects_non_hmac_algorithm() {
        let token = keys().create_token(&user("abc@gmail.com", "root")).expect("sign");
        let (_, rest) = token.split_once('.').expect("jwt segments");
        // base64url of {"alg":"RS256","typ":"JWT"}
        let forged = format!("eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.{rest}");
        assert!(matches!(keys().decrypt_token(&forged), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn decrypt_rejects_garbage() {
        assert!(matches!(
            keys().decrypt_token("not.a.jwt"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn missing_secret_is_config_error() {
        let keys = JwtKeys::from_secret("");
        assert!(matches!(
            keys.create_token(&user("abc@gmail.com", "root")),
            Err(AuthError::Config)
        ));
        assert!(matches!(keys.decrypt_token("x.y.z"), Err(AuthError::Config)));
    }

    #[tokio::test]
    async fn validate_accepts_configured_identity_only() {
        let keys = keys();
        let creds = StaticCredentials::new("abc@gmail.com", "root").expect("credentials");

        let good = keys.create_token(&user("abc@gmail.com", "root")).expect("sign");
        let claims = validate_token(&headers_with(&good), &keys, &creds)
            .await
            .expect("valid");
        assert_eq!(claims.email, "abc@gmail.com");

        for (email, password) in [("abc@gmail.com", "toor"), ("x@gmail.com", "root"), ("", "")] {
            let token = keys.create_token(&user(email, password)).expect("sign");
            let err = validate_token(&headers_with(&token), &keys, &creds)
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::Authentication));
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn validate_leaves_the_executor_free() {
        use std::sync::{
            atomic::{AtomicBool, AtomicUsize, Ordering},
            Arc,
        };

        let keys = keys();
        let creds = StaticCredentials::new("abc@gmail.com", "root").expect("credentials");
        let token = keys.create_token(&user("abc@gmail.com", "root")).expect("sign");

        let ticks = Arc::new(AtomicUsize::new(0));
        let done = Arc::new(AtomicBool::new(false));
        let ticker = tokio::spawn({
            let (ticks, done) = (ticks.clone(), done.clone());
            async move {
                while !done.load(Ordering::SeqCst) {
                    ticks.fetch_add(1, Ordering::SeqCst);
                    tokio::task::yield_now().await;
                }
            }
        });

        validate_token(&headers_with(&token), &keys, &creds)
            .await
            .expect("valid");
        done.store(true, Ordering::SeqCst);
        ticker.await.expect("ticker");

        assert!(ticks.load(Ordering::SeqCst) > 0);
    }

    #[tokio::test]
    async fn validate_requires_header() {
        let creds = StaticCredentials::new("abc@gmail.com", "root").expect("credentials");
        let err = validate_token(&HeaderMap::new(), &keys(), &creds)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmptyToken));
    }
}
