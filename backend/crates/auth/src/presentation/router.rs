//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use platform::token::TokenCodec;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{AccessGuard, AccessTier};
use crate::domain::repository::UserRepository;
use crate::infra::store::UserStore;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AccessLayerState, require_access};

/// Create the auth router over the store selected at startup
pub fn auth_router(store: UserStore, config: AuthConfig) -> Router {
    auth_router_generic(store, config)
}

/// Create the auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let codec = TokenCodec::new(&config.token_secret, config.token_algorithm);
    let guard = AccessGuard::new(Arc::new(codec));

    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        guard: guard.clone(),
    };

    let tier = |tier: AccessTier| AccessLayerState {
        guard: guard.clone(),
        tier,
    };

    let high_priority = Router::new()
        .route("/high-priority", get(handlers::high_priority))
        .route_layer(middleware::from_fn_with_state(
            tier(AccessTier::HighPriority),
            require_access,
        ));

    let medium_priority = Router::new()
        .route("/medium-priority", get(handlers::medium_priority))
        .route_layer(middleware::from_fn_with_state(
            tier(AccessTier::MediumPriority),
            require_access,
        ));

    let general = Router::new()
        .route("/general", get(handlers::general))
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(
            tier(AccessTier::General),
            require_access,
        ));

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/login", post(handlers::log_in::<R>))
        .route("/health", get(handlers::health::<R>))
        .with_state(state)
        .merge(high_priority)
        .merge(medium_priority)
        .merge(general)
}
