//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::application::{SeedDemoUserUseCase, SeedOutcome};
use auth::domain::repository::UserRepository;
use auth::{AuthConfig, StoreConfig, UserStore, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Fatal on a missing or weak signing secret
    let auth_config = AuthConfig::from_env()?;
    let store_config = StoreConfig::from_env()?;

    tracing::info!(
        algorithm = %auth_config.token_algorithm,
        token_ttl_minutes = auth_config.token_ttl.num_minutes(),
        "Auth configuration loaded"
    );

    // Backend is chosen once and fixed for the process lifetime
    let store = UserStore::connect(&store_config).await;

    if auth_config.seed_demo_user {
        let seed = SeedDemoUserUseCase::new(Arc::new(store.clone()));
        match seed.execute().await {
            Ok(SeedOutcome::Created) => tracing::info!("Demo user created"),
            Ok(SeedOutcome::AlreadyPresent) => tracing::info!("Demo user already present"),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Demo user seed failed, continuing anyway"
                );
            }
        }
    }

    match store.count(None).await {
        Ok(users) => tracing::info!(backend = %store.backend(), users, "User store ready"),
        Err(e) => tracing::warn!(backend = %store.backend(), error = %e, "User store not responding"),
    }

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());
    let allowed_origins = parse_frontend_origins(&frontend_origins)?;

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .merge(auth_router(store, auth_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
        .parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Comma-separated explicit origins. Credentials are allowed, so a wildcard
/// is a startup error rather than a tower-http panic.
fn parse_frontend_origins(raw: &str) -> anyhow::Result<Vec<http::HeaderValue>> {
    let mut origins = Vec::new();
    for origin in raw.split(',').map(str::trim).filter(|o| !o.is_empty()) {
        if origin == "*" {
            anyhow::bail!("FRONTEND_ORIGINS cannot contain '*' when credentials are allowed");
        }
        origins.push(origin.parse()?);
    }
    Ok(origins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_origin_is_rejected() {
        let err = parse_frontend_origins("*").unwrap_err();
        assert!(err.to_string().contains("cannot contain '*'"));

        assert!(parse_frontend_origins("http://localhost:5173, *").is_err());
    }

    #[test]
    fn test_explicit_origins_are_parsed() {
        let origins = parse_frontend_origins("http://localhost:5173, https://app.example.com,").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "http://localhost:5173");
        assert_eq!(origins[1], "https://app.example.com");
    }
}
