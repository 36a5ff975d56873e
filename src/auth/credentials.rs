use async_trait::async_trait;

use super::password::hash_password;

/// A known identity. The password is kept only as an argon2 hash.
#[derive(Debug, Clone)]
pub struct Credential {
    pub email: String,
    pub password_hash: String,
}

/// Lookup used by token validation to resolve the identity in the claims.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Credential>>;
}

/// Exactly one identity, configured at startup.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credential: Credential,
}

impl StaticCredentials {
    pub fn new(email: &str, password: &str) -> anyhow::Result<Self> {
        Ok(Self {
            credential: Credential {
                email: email.to_string(),
                password_hash: hash_password(password)?,
            },
        })
    }
}

#[async_trait]
impl CredentialStore for StaticCredentials {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Credential>> {
        Ok((self.credential.email == email).then(|| self.credential.clone()))
    }
}
