use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub sslmode: String,
}

impl DbConfig {
    /// Postgres URL assembled from the discrete settings.
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            self.user, self.password, self.host, self.port, self.name, self.sslmode
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    pub secret: String,
}

/// The single identity allowed to mint usable tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub token: TokenConfig,
    pub auth: AuthConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => DbConfig {
                host: var("DB_HOST", "localhost"),
                port: var("DB_PORT", "5432").parse().context("DB_PORT must be a port number")?,
                user: var("DB_USER", "postgres"),
                password: var("DB_PASSWORD", "postgres"),
                name: var("DB_NAME", "testdb"),
                sslmode: var("DB_SSLMODE", "disable"),
            }
            .connection_string(),
        };

        let secret = lookup("TOKEN_SECRET")
            .or_else(|| lookup("TOKENSECRET"))
            .filter(|s| !s.is_empty())
            .context("TOKEN_SECRET is not set")?;

        Ok(Self {
            database_url,
            max_connections: var("DB_MAX_CONNECTIONS", "10")
                .parse()
                .context("DB_MAX_CONNECTIONS must be an integer")?,
            token: TokenConfig { secret },
            auth: AuthConfig {
                email: var("AUTH_EMAIL", "abc@gmail.com"),
                password: var("AUTH_PASSWORD", "root"),
            },
            host: var("APP_HOST", "0.0.0.0"),
            port: var("APP_PORT", "8080").parse().context("APP_PORT must be a port number")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn builds_database_url_from_parts() {
        let cfg = load(&[("TOKEN_SECRET", "s"), ("DB_HOST", "db"), ("DB_NAME", "companies")])
            .expect("config");
        assert_eq!(
            cfg.database_url,
            "postgres://postgres:postgres@db:5432/companies?sslmode=disable"
        );
        assert_eq!(cfg.max_connections, 10);
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    fn database_url_overrides_parts() {
        let cfg = load(&[
            ("TOKEN_SECRET", "s"),
            ("DATABASE_URL", "postgres://u:p@h/x"),
            ("DB_HOST", "ignored"),
        ])
        .expect("config");
        assert_eq!(cfg.database_url, "postgres://u:p@h/x");
    }

    #[test]
    fn secret_is_required() {
        let err = load(&[]).unwrap_err();
        assert!(err.to_string().contains("TOKEN_SECRET"));
        assert!(load(&[("TOKEN_SECRET", "")]).is_err());
    }

    #[test]
    fn legacy_secret_name_is_accepted() {
        let cfg = load(&[("TOKENSECRET", "legacy")]).expect("config");
        assert_eq!(cfg.token.secret, "legacy");
    }

    #[test]
    fn default_identity() {
        let cfg = load(&[("TOKEN_SECRET", "s")]).expect("config");
        assert_eq!(cfg.auth.email, "abc@gmail.com");
        assert_eq!(cfg.auth.password, "root");
    }

    #[test]
    fn rejects_bad_port() {
        assert!(load(&[("TOKEN_SECRET", "s"), ("APP_PORT", "http")]).is_err());
    }
}
