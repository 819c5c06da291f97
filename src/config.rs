/*
 * Responsibility
 * - Load settings from the environment (DATABASE_URL, CORS allowlist, token secret, ...)
 * - Validate them up front (missing or invalid values abort startup)
 * - AuthConfig is built once here and handed to the token codec; nothing reads the secret
 *   from the environment afterwards
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings consumed by the token codec.
///
/// The secret is fixed for the lifetime of the process and is never printed.
#[derive(Clone)]
pub struct AuthConfig {
    secret: String,
    pub token_ttl: Duration,
    pub leeway_seconds: u64,
}

impl AuthConfig {
    pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);
    /// Upper bound so `iat + ttl` always fits the i64 `exp` claim.
    pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);

    pub fn new(
        secret: impl Into<String>,
        token_ttl: Duration,
        leeway_seconds: u64,
    ) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::Invalid("ACCESS_TOKEN_SECRET"));
        }
        // Tokens carry whole-second timestamps
        if token_ttl.as_secs() == 0 || token_ttl > Self::MAX_TOKEN_TTL {
            return Err(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"));
        }

        Ok(Self {
            secret,
            token_ttl,
            leeway_seconds,
        })
    }

    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

/// Parse an optional setting. Absent means `None`; present but unparseable is an error.
fn parse_var<T: FromStr>(key: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError> {
    raw.map(|v| v.trim().parse::<T>().map_err(|_| ConfigError::Invalid(key)))
        .transpose()
}

fn env_var<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    parse_var(key, std::env::var(key).ok())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub sqids_min_length: usize,
    pub sqids_alphabet: String,

    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = env_var("PORT")?.unwrap_or(5000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections: u32 = env_var("DATABASE_MAX_CONNECTIONS")?.unwrap_or(10);

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let sqids_min_length: usize = env_var("SQIDS_MIN_LENGTH")?.unwrap_or(10);

        let sqids_alphabet = std::env::var("SQIDS_ALPHABET").unwrap_or_else(|_| {
            "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".to_string()
        });

        let secret = std::env::var("ACCESS_TOKEN_SECRET")
            .map_err(|_| ConfigError::Missing("ACCESS_TOKEN_SECRET"))?;

        let token_ttl = env_var::<u64>("ACCESS_TOKEN_TTL_SECONDS")?
            .map(Duration::from_secs)
            .unwrap_or(AuthConfig::DEFAULT_TOKEN_TTL);

        let leeway_seconds: u64 = env_var("ACCESS_TOKEN_LEEWAY_SECONDS")?.unwrap_or(0);

        let auth = AuthConfig::new(secret, token_ttl, leeway_seconds)?;

        Ok(Self {
            addr,
            database_url,
            database_max_connections,
            app_env,
            cors_allowed_origins,
            sqids_min_length,
            sqids_alphabet,
            auth,
        })
    }
}
