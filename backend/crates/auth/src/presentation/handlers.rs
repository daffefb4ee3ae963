//! HTTP Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    AccessClaims, AccessGuard, CheckHealthUseCase, LogInInput, LogInUseCase, SignUpInput,
    SignUpUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AccessGrantedResponse, HealthResponse, LogInRequest, LogInResponse, SignUpRequest,
    SignUpResponse, UserInfo,
};

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub guard: AccessGuard,
}

// Manual impl: `R` itself need not be `Clone`
impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            guard: self.guard.clone(),
        }
    }
}

/// Unwrap a JSON body, turning any rejection into a 400
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AuthError::InvalidInput(rejection.body_text()))
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<SignUpResponse>)>
where
    R: UserRepository + Send + Sync + 'static,
{
    let req = json_body(body)?;
    let use_case = SignUpUseCase::new(state.repo.clone());

    let input = SignUpInput {
        name: req.name,
        email: req.email,
        phone: req.phone,
        vehicle_number: req.vehicle_number,
        vehicle_type: req.vehicle_type,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "User registered successfully".to_string(),
            id: output.user_id.to_string(),
        }),
    ))
}

// ============================================================================
// Log In
// ============================================================================

/// POST /login
pub async fn log_in<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<LogInRequest>, JsonRejection>,
) -> AuthResult<Json<LogInResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let req = json_body(body)?;
    let use_case = LogInUseCase::new(state.repo.clone(), state.guard.clone(), state.config.clone());

    let output = use_case
        .execute(LogInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LogInResponse {
        access_token: output.access_token,
        token_type: "bearer",
        user_role: output.vehicle_type,
        user_name: output.name,
    }))
}

// ============================================================================
// Protected routes
// ============================================================================

/// GET /high-priority
pub async fn high_priority(Extension(claims): Extension<AccessClaims>) -> Json<AccessGrantedResponse> {
    Json(AccessGrantedResponse {
        message: "High priority access granted",
        user: claims.into(),
    })
}

/// GET /medium-priority
pub async fn medium_priority(
    Extension(claims): Extension<AccessClaims>,
) -> Json<AccessGrantedResponse> {
    Json(AccessGrantedResponse {
        message: "Medium priority access granted",
        user: claims.into(),
    })
}

/// GET /general
pub async fn general(Extension(claims): Extension<AccessClaims>) -> Json<AccessGrantedResponse> {
    Json(AccessGrantedResponse {
        message: "General authenticated access",
        user: claims.into(),
    })
}

/// GET /me
pub async fn me(Extension(claims): Extension<AccessClaims>) -> Json<UserInfo> {
    Json(claims.into())
}

// ============================================================================
// Health
// ============================================================================

/// GET /health
///
/// Always 200; store problems are reported in the body.
pub async fn health<R>(State(state): State<AuthAppState<R>>) -> Json<HealthResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let output = CheckHealthUseCase::new(state.repo.clone()).execute().await;
    Json(output.into())
}
