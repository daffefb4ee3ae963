//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::{AccessClaims, HealthOutput};
use crate::domain::repository::StoreBackend;
use crate::domain::value_object::vehicle_type::VehicleType;

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_number: String,
    /// Validated by the use case so an unknown value maps to 400
    pub vehicle_type: String,
    pub password: String,
}

/// Sign up response
#[derive(Debug, Clone, Serialize)]
pub struct SignUpResponse {
    pub message: String,
    pub id: String,
}

// ============================================================================
// Log In
// ============================================================================

/// Log in request
#[derive(Debug, Clone, Deserialize)]
pub struct LogInRequest {
    pub email: String,
    pub password: String,
}

/// Log in response
#[derive(Debug, Clone, Serialize)]
pub struct LogInResponse {
    pub access_token: String,
    /// Always `"bearer"`
    pub token_type: &'static str,
    pub user_role: VehicleType,
    pub user_name: String,
}

// ============================================================================
// Protected routes
// ============================================================================

/// Caller identity taken from verified token claims
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub email: String,
    pub role: VehicleType,
    pub name: String,
}

impl From<AccessClaims> for UserInfo {
    fn from(claims: AccessClaims) -> Self {
        Self {
            email: claims.email,
            role: claims.vehicle_type,
            name: claims.name,
        }
    }
}

/// Tier route response
#[derive(Debug, Clone, Serialize)]
pub struct AccessGrantedResponse {
    pub message: &'static str,
    pub user: UserInfo,
}

// ============================================================================
// Health
// ============================================================================

/// Health response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub backend: StoreBackend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<HealthOutput> for HealthResponse {
    fn from(output: HealthOutput) -> Self {
        match output {
            HealthOutput::Healthy {
                backend,
                users_count,
            } => Self {
                status: "healthy",
                database: "connected",
                backend,
                users_count: Some(users_count),
                error: None,
            },
            HealthOutput::Unhealthy { backend, error } => Self {
                status: "unhealthy",
                database: "disconnected",
                backend,
                users_count: None,
                error: Some(error),
            },
        }
    }
}
