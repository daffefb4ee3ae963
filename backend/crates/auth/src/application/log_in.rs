//! Log In Use Case
//!
//! Verifies credentials and issues an access token.

use std::sync::Arc;

use crate::application::access_guard::{AccessClaims, AccessGuard};
use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
    vehicle_type::VehicleType,
};
use crate::error::{AuthError, AuthResult};

/// Log in input
pub struct LogInInput {
    pub email: String,
    pub password: String,
}

/// Log in output
#[derive(Debug)]
pub struct LogInOutput {
    pub access_token: String,
    pub vehicle_type: VehicleType,
    pub name: String,
}

/// Log in use case
pub struct LogInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    guard: AccessGuard,
    config: Arc<AuthConfig>,
}

impl<U> LogInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, guard: AccessGuard, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            guard,
            config,
        }
    }

    /// Unknown email, malformed email and wrong password all fail with the
    /// same `InvalidCredentials`, and all pay for one Argon2 verification.
    pub async fn execute(&self, input: LogInInput) -> AuthResult<LogInOutput> {
        let raw_password = RawPassword::candidate(input.password);

        let user = match Email::new(input.email) {
            Ok(email) => self.user_repo.find_by_email(&email).await?,
            Err(_) => None,
        };

        let stored = user
            .as_ref()
            .map_or_else(|| UserPassword::dummy().clone(), |u| u.password_hash.clone());
        let matches = stored.verify_blocking(raw_password).await?;

        let user = user
            .filter(|_| matches)
            .ok_or(AuthError::InvalidCredentials)?;

        let claims = AccessClaims::for_user(&user);
        let access_token = self.guard.issue(&claims, self.config.token_ttl)?;

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            vehicle_type = %user.vehicle_type,
            "User logged in"
        );

        Ok(LogInOutput {
            access_token,
            vehicle_type: user.vehicle_type,
            name: user.name,
        })
    }
}
