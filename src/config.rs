use std::env;

const DEV_TOKEN_KEY: &str = "realty-dev-token-key-do-not-use-in-production";

const DEFAULT_TOKEN_TTL_HOURS: u64 = 24;

/// One year. Longer lifetimes are cut down to this.
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365;

/// Token lifetime from a raw setting: zero or unset falls back to the
/// default, anything above [`MAX_TOKEN_TTL_HOURS`] is capped.
pub fn token_ttl_hours(raw: Option<u64>) -> u64 {
    match raw {
        Some(0) | None => DEFAULT_TOKEN_TTL_HOURS,
        Some(hours) => hours.min(MAX_TOKEN_TTL_HOURS),
    }
}

/// Settings for signing and verifying bearer tokens.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC secret shared by the signer and the verifier
    pub secret: String,
    /// Lifetime of tokens issued by the CLI, in hours
    pub ttl_hours: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub dev_mode: bool,
    pub token_secret: Option<String>,
    pub token_ttl_hours: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let dev_mode = env::var("REALTY_ENV")
            .map(|v| v == "dev" || v == "development")
            .unwrap_or(false);

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let token_ttl_hours =
            token_ttl_hours(env::var("TOKEN_TTL_HOURS").ok().and_then(|v| v.parse().ok()));

        Self {
            host,
            port,
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "realty.db".to_string()),
            dev_mode,
            token_secret: env::var("JSON_TOKEN_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            token_ttl_hours,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Token settings. The secret is required outside of dev mode.
    pub fn token_config(&self) -> anyhow::Result<TokenConfig> {
        let secret = match &self.token_secret {
            Some(secret) => secret.clone(),
            None if self.dev_mode => {
                tracing::warn!("JSON_TOKEN_KEY not set, using the built-in development key");
                DEV_TOKEN_KEY.to_string()
            }
            None => anyhow::bail!("JSON_TOKEN_KEY must be set outside of dev mode"),
        };

        Ok(TokenConfig {
            secret,
            ttl_hours: self.token_ttl_hours,
        })
    }
}
