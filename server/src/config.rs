//! Server configuration module.
//!
//! This module provides configuration loading for the identity server from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `AUTH_ENVIRONMENT`: `production` or anything else (default: `development`)
//! - `AUTH_JWT_SECRET`: HMAC signing secret (required in production; an insecure
//!   development default is used otherwise)
//! - `AUTH_TOKEN_LIFETIME_SECS`: Token lifetime in seconds (default: `3600`)
//! - `AUTH_HASH_MEMORY_KIB`: Argon2 memory cost (default: `19456`)
//! - `AUTH_HASH_ITERATIONS`: Argon2 time cost (default: `2`)
//! - `AUTH_HASH_PARALLELISM`: Argon2 lanes (default: `1`)
//! - `AUTH_LISTEN_PORT`: Port to listen on (default: `3000`)
//! - `AUTH_CORS_ORIGINS`: Comma separated allowed origins
//!   (default: `http://localhost:4200,http://localhost:4201`)
//! - `AUTH_ADMIN_EMAIL`: Bootstrap admin email (default: `admin@example.com`)
//! - `AUTH_ADMIN_PASSWORD`: Bootstrap admin password (default: `admin123`)
//!
//! # Invariants
//!
//! - `jwt_secret` is never empty
//! - `token_lifetime_secs` is always greater than zero
//! - `listen_port` is always a valid port number (1-65535)

use crate::auth::HashCost;

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }
}

/// Where the signing secret came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    /// Read from `AUTH_JWT_SECRET`.
    Environment,
    /// `AUTH_JWT_SECRET` was unset and the built-in development secret is in use.
    InsecureDefault,
}

/// Server configuration.
///
/// Contains all configuration parameters needed to run the identity server.
///
/// # Post-conditions
///
/// When constructed via `from_env()`:
/// - `jwt_secret` is non-empty
/// - `token_lifetime_secs` is positive
#[derive(Clone)]
pub struct ServerConfig {
    pub environment: Environment,
    /// HMAC secret for signing tokens.
    pub jwt_secret: Vec<u8>,
    pub secret_source: SecretSource,
    pub token_lifetime_secs: u64,
    pub hash_cost: HashCost,
    /// Port to listen on for HTTP connections.
    pub listen_port: u16,
    /// Origins allowed by CORS.
    pub cors_origins: Vec<String>,
    pub admin_email: String,
    pub admin_password: String,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("environment", &self.environment)
            .field("secret_source", &self.secret_source)
            .field("token_lifetime_secs", &self.token_lifetime_secs)
            .field("hash_cost", &self.hash_cost)
            .field("listen_port", &self.listen_port)
            .field("cors_origins", &self.cors_origins)
            .field("admin_email", &self.admin_email)
            .finish_non_exhaustive()
    }
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is missing.
    MissingEnvVar(String),
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnvVar(name) => {
                write!(f, "missing required environment variable: {name}")
            }
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Default port for the server.
    pub const DEFAULT_PORT: u16 = 3000;
    /// Default token lifetime (one hour).
    pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;
    /// Signing secret used when none is configured outside production.
    /// Anyone can forge tokens for a server running with this secret.
    pub const INSECURE_DEVELOPMENT_SECRET: &'static str = "your-secret-key-change-in-production";
    pub const DEFAULT_CORS_ORIGINS: &'static str = "http://localhost:4200,http://localhost:4201";
    pub const DEFAULT_ADMIN_EMAIL: &'static str = "admin@example.com";
    pub const DEFAULT_ADMIN_PASSWORD: &'static str = "admin123";

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `AUTH_JWT_SECRET` is unset in production, or set but empty
    /// - a numeric variable is set but not a valid number for its range
    /// - `AUTH_CORS_ORIGINS` contains the `*` wildcard
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `from_env` uses the process environment; tests pass a map.
    ///
    /// # Errors
    ///
    /// Same as `from_env`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = lookup("AUTH_ENVIRONMENT")
            .as_deref()
            .map_or(Environment::Development, Environment::parse);
        let (jwt_secret, secret_source) = Self::load_jwt_secret(&lookup, environment)?;

        let token_lifetime_secs = parse_or(
            &lookup,
            "AUTH_TOKEN_LIFETIME_SECS",
            Self::DEFAULT_TOKEN_LIFETIME_SECS,
        )?;
        if token_lifetime_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "AUTH_TOKEN_LIFETIME_SECS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        let hash_cost = HashCost {
            memory_kib: parse_or(&lookup, "AUTH_HASH_MEMORY_KIB", HashCost::DEFAULT.memory_kib)?,
            iterations: parse_or(&lookup, "AUTH_HASH_ITERATIONS", HashCost::DEFAULT.iterations)?,
            parallelism: parse_or(
                &lookup,
                "AUTH_HASH_PARALLELISM",
                HashCost::DEFAULT.parallelism,
            )?,
        };

        let listen_port = Self::load_listen_port(&lookup)?;

        let cors_origins = Self::load_cors_origins(&lookup)?;

        Ok(Self {
            environment,
            jwt_secret,
            secret_source,
            token_lifetime_secs,
            hash_cost,
            listen_port,
            cors_origins,
            admin_email: lookup("AUTH_ADMIN_EMAIL")
                .unwrap_or_else(|| Self::DEFAULT_ADMIN_EMAIL.to_string()),
            admin_password: lookup("AUTH_ADMIN_PASSWORD")
                .unwrap_or_else(|| Self::DEFAULT_ADMIN_PASSWORD.to_string()),
        })
    }

    /// Load the signing secret.
    ///
    /// Falls back to `INSECURE_DEVELOPMENT_SECRET` outside production.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is missing in production or set but empty.
    fn load_jwt_secret(
        lookup: &impl Fn(&str) -> Option<String>,
        environment: Environment,
    ) -> Result<(Vec<u8>, SecretSource), ConfigError> {
        match lookup("AUTH_JWT_SECRET") {
            Some(secret) if secret.is_empty() => Err(ConfigError::InvalidValue {
                name: "AUTH_JWT_SECRET".to_string(),
                message: "must not be empty".to_string(),
            }),
            Some(secret) => Ok((secret.into_bytes(), SecretSource::Environment)),
            None if environment == Environment::Production => {
                Err(ConfigError::MissingEnvVar("AUTH_JWT_SECRET".to_string()))
            }
            None => Ok((
                Self::INSECURE_DEVELOPMENT_SECRET.as_bytes().to_vec(),
                SecretSource::InsecureDefault,
            )),
        }
    }

    /// Load the comma-separated CORS origin list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list contains the `*` wildcard. Responses carry
    /// credentials, which browsers refuse to pair with a wildcard origin.
    fn load_cors_origins(
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<Vec<String>, ConfigError> {
        let origins: Vec<String> = lookup("AUTH_CORS_ORIGINS")
            .unwrap_or_else(|| Self::DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if origins.iter().any(|origin| origin == "*") {
            return Err(ConfigError::InvalidValue {
                name: "AUTH_CORS_ORIGINS".to_string(),
                message: "wildcard origin cannot be combined with credentials".to_string(),
            });
        }

        Ok(origins)
    }

    /// Load the listen port.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is set but not a valid port number.
    fn load_listen_port(lookup: &impl Fn(&str) -> Option<String>) -> Result<u16, ConfigError> {
        match lookup("AUTH_LISTEN_PORT") {
            Some(value) => match value.parse::<u16>() {
                Ok(port) if port > 0 => Ok(port),
                _ => Err(ConfigError::InvalidValue {
                    name: "AUTH_LISTEN_PORT".to_string(),
                    message: format!("'{value}' is not a valid port number (must be 1-65535)"),
                }),
            },
            None => Ok(Self::DEFAULT_PORT),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            message: format!("'{value}' is not a valid number"),
        }),
        None => Ok(default),
    }
}
