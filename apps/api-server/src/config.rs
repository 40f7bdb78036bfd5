//! Application configuration loaded from environment variables.

use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

use blog_infra::{JwtConfig, PasswordHashConfig};

#[cfg(feature = "postgres")]
use blog_infra::DatabaseConfig;

/// Longest accepted session lifetime: one year.
const MAX_SESSION_TTL_SECS: i64 = 365 * 24 * 3600;

/// Longest accepted JWT lifetime: one year.
const MAX_JWT_EXPIRATION_HOURS: i64 = 365 * 24;

/// Configuration errors are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be set when {reason}")]
    Missing { name: &'static str, reason: &'static str },

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// How authentication credentials are issued and checked.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Opaque server-side sessions, revocable on logout.
    Session { ttl_secs: i64 },
    /// Signed, stateless JWTs.
    Jwt(JwtConfig),
}

/// Redis connection settings for the session store.
#[derive(Debug, Clone)]
pub struct RedisSettings {
    pub url: String,
    pub connect_timeout: Duration,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `RUST_ENV=production` turns on secure cookies.
    pub production: bool,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    pub auto_migrate: bool,
    pub auth: AuthStrategy,
    pub redis: Option<RedisSettings>,
    pub password_hash: PasswordHashConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        #[cfg(feature = "postgres")]
        let database = match vars.get("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: vars.parse_or("DB_MAX_CONNECTIONS", 100)?,
                min_connections: vars.parse_or("DB_MIN_CONNECTIONS", 10)?,
            }),
            None => None,
        };

        let auth = match vars.get("AUTH_STRATEGY").as_deref() {
            None | Some("session") => AuthStrategy::Session {
                ttl_secs: vars.parse_within(
                    "SESSION_TTL_SECS",
                    86_400,
                    1..=MAX_SESSION_TTL_SECS,
                )?,
            },
            Some("jwt") => AuthStrategy::Jwt(JwtConfig {
                secret: vars.get("JWT_SECRET").ok_or(ConfigError::Missing {
                    name: "JWT_SECRET",
                    reason: "AUTH_STRATEGY=jwt",
                })?,
                expiration_hours: vars.parse_within(
                    "JWT_EXPIRATION_HOURS",
                    24,
                    1..=MAX_JWT_EXPIRATION_HOURS,
                )?,
                issuer: vars
                    .get("JWT_ISSUER")
                    .unwrap_or_else(|| "quill-api".to_string()),
            }),
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "AUTH_STRATEGY",
                    value: other.to_string(),
                });
            }
        };

        let redis = match vars.get("REDIS_URL") {
            Some(url) => Some(RedisSettings {
                url,
                connect_timeout: Duration::from_secs(
                    vars.parse_or("REDIS_CONNECT_TIMEOUT_SECS", 5)?,
                ),
            }),
            None => None,
        };

        let defaults = PasswordHashConfig::default();
        let password_hash = PasswordHashConfig {
            memory_kib: vars.parse_or("PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: vars.parse_or("PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: vars.parse_or("PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
        };

        Ok(Self {
            host: vars.get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: vars.parse_or("PORT", 8080)?,
            production: vars.get("RUST_ENV").as_deref() == Some("production"),
            #[cfg(feature = "postgres")]
            database,
            auto_migrate: vars.parse_or("DB_AUTO_MIGRATE", false)?,
            auth,
            redis,
            password_hash,
        })
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Non-empty value of `name`.
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name).filter(|v| !v.trim().is_empty())
    }

    fn parse_or<T: FromStr>(&self, name: &'static str, default: T) -> Result<T, ConfigError> {
        match self.get(name) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { name, value: raw }),
            None => Ok(default),
        }
    }

    fn parse_within<T>(
        &self,
        name: &'static str,
        default: T,
        range: RangeInclusive<T>,
    ) -> Result<T, ConfigError>
    where
        T: FromStr + PartialOrd + ToString,
    {
        let value = self.parse_or(name, default)?;
        if range.contains(&value) {
            Ok(value)
        } else {
            Err(ConfigError::Invalid {
                name,
                value: value.to_string(),
            })
        }
    }
}
