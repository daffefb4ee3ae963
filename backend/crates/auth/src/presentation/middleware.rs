//! Access Middleware
//!
//! Guards protected routes with a bearer token and a role tier.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer;

use crate::application::{AccessGuard, AccessTier};
use crate::error::AuthError;

/// Middleware state: the guard plus the tier one route group requires
#[derive(Debug, Clone)]
pub struct AccessLayerState {
    pub guard: AccessGuard,
    pub tier: AccessTier,
}

/// Middleware that requires a valid bearer token whose role is in the tier.
///
/// Verified `AccessClaims` are stored in the request extensions.
pub async fn require_access(
    State(state): State<AccessLayerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer(req.headers())?;
    let claims = state.guard.check(token, state.tier)?;

    tracing::debug!(
        email = %claims.email,
        vehicle_type = %claims.vehicle_type,
        tier = ?state.tier,
        "Access granted"
    );

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
