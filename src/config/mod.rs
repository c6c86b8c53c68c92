use std::env;
use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use thiserror::Error;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TOKEN_LIFETIME: &str = "7d";
const MAX_TOKEN_LIFETIME_DAYS: i64 = 365;

const REQUIRED_VARS: [&str; 2] = ["DATABASE_URL", "JWT_SECRET"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Production => f.write_str("production"),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub environment: Environment,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_expires_in: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("database_max_connections", &self.database_max_connections)
            .field("jwt_expires_in", &self.jwt_expires_in)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source. Every missing required
    /// variable is reported at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let missing: Vec<&'static str> = REQUIRED_VARS
            .into_iter()
            .filter(|name| get(*name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT, |v| v.parse().ok())?;
        let environment = parse_or("RUST_ENV", get("RUST_ENV"), Environment::default(), |v| {
            v.parse().ok()
        })?;
        let database_max_connections = parse_or(
            "DATABASE_MAX_CONNECTIONS",
            get("DATABASE_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
            |v| v.parse::<u32>().ok().filter(|n| *n > 0),
        )?;
        let jwt_expires_in = parse_or(
            "JWT_EXPIRES_IN",
            get("JWT_EXPIRES_IN"),
            parse_lifetime(DEFAULT_TOKEN_LIFETIME).unwrap_or_else(|| Duration::days(7)),
            parse_lifetime,
        )?;

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            port,
            environment,
            database_url: get("DATABASE_URL").unwrap_or_default(),
            database_max_connections,
            jwt_secret: get("JWT_SECRET").unwrap_or_default(),
            jwt_expires_in,
            cors_allowed_origins,
        })
    }
}

fn parse_or<T, P>(
    name: &'static str,
    raw: Option<String>,
    default: T,
    parse: P,
) -> Result<T, ConfigError>
where
    P: Fn(&str) -> Option<T>,
{
    match raw {
        None => Ok(default),
        Some(value) => parse(value.trim()).ok_or(ConfigError::Invalid { name, value }),
    }
}

/// Parses `30s`, `15m`, `12h`, `7d` or a bare number of seconds.
/// Lifetimes longer than a year are rejected.
pub fn parse_lifetime(value: &str) -> Option<Duration> {
    let value = value.trim();
    let (digits, unit) = match value.char_indices().last()? {
        (i, c) if c.is_ascii_alphabetic() => (&value[..i], c),
        _ => (value, 's'),
    };
    let amount: i64 = digits.parse().ok().filter(|n| *n > 0)?;

    let lifetime = match unit {
        's' => Duration::try_seconds(amount),
        'm' => Duration::try_minutes(amount),
        'h' => Duration::try_hours(amount),
        'd' => Duration::try_days(amount),
        _ => None,
    }?;
    (lifetime <= Duration::days(MAX_TOKEN_LIFETIME_DAYS)).then_some(lifetime)
}
