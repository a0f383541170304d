#![cfg_attr(test, allow(clippy::disallowed_methods))]
// Forbid unwrap() in production code to prevent panics at startup.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
use std::net::SocketAddr;
use std::sync::Arc;

use identity_server::auth::{PasswordHasher, SigningKey, TokenIssuer};
use identity_server::config::{Environment, SecretSource, ServerConfig};
use identity_server::http::{AppState, build_router};
use identity_server::time::SystemTimeSource;
use identity_server::{CredentialStore, IdentityService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_server=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Loaded configuration: environment={:?}, listen_port={}, token_lifetime_secs={}, hash_cost={:?}",
        config.environment,
        config.listen_port,
        config.token_lifetime_secs,
        config.hash_cost
    );

    if config.secret_source == SecretSource::InsecureDefault {
        tracing::warn!(
            "AUTH_JWT_SECRET is not set; using the built-in development secret. \
             Anyone can forge tokens for this server. Never deploy it like this."
        );
    }
    if config.admin_password == ServerConfig::DEFAULT_ADMIN_PASSWORD {
        if config.environment == Environment::Production {
            tracing::error!("Bootstrap admin uses the default password in production");
        } else {
            tracing::warn!("Bootstrap admin uses the default password");
        }
    }

    // Key material is the only thing the server cannot run without.
    let key = match SigningKey::new_hs256(&config.jwt_secret) {
        Ok(key) => key,
        Err(e) => {
            tracing::error!("Failed to initialize signing key: {e}");
            std::process::exit(1);
        }
    };
    if key.is_weak() {
        tracing::warn!("AUTH_JWT_SECRET is shorter than the recommended 32 bytes");
    }

    let hasher = match PasswordHasher::new(config.hash_cost) {
        Ok(hasher) => hasher,
        Err(e) => {
            tracing::error!("Failed to initialize password hasher: {e}");
            std::process::exit(1);
        }
    };

    let clock = Arc::new(SystemTimeSource);
    let issuer = TokenIssuer::new(
        key,
        config.token_lifetime_secs,
        Arc::<SystemTimeSource>::clone(&clock),
    );
    let identity = match IdentityService::new(CredentialStore::new(), hasher, issuer, clock) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::error!("Failed to initialize identity service: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = identity.seed_admin(&config.admin_email, &config.admin_password) {
        tracing::error!("Failed to seed bootstrap admin: {e}");
        std::process::exit(1);
    }

    let app = build_router(AppState::new(identity), &config.cors_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind: {e}");
            std::process::exit(1);
        });

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    });
}
