use serde::{Deserialize, Serialize};

/// Token payload. Deliberately carries nothing but the credential pair and
/// no `exp`, so tokens never expire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub password: String,
}
