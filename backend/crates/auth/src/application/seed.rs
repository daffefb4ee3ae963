//! Demo Account Seed
//!
//! Optional startup hook that registers a fixed demo account.

use std::sync::Arc;

use crate::application::sign_up::{SignUpInput, SignUpUseCase};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

pub const DEMO_EMAIL: &str = "test@example.com";
pub const DEMO_PASSWORD: &str = "password123";

/// Outcome of a seed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Created,
    AlreadyPresent,
}

/// Seed demo user use case
pub struct SeedDemoUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> SeedDemoUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self) -> AuthResult<SeedOutcome> {
        let email = Email::new(DEMO_EMAIL)?;
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Ok(SeedOutcome::AlreadyPresent);
        }

        let input = SignUpInput {
            name: "Test User".to_string(),
            email: DEMO_EMAIL.to_string(),
            phone: "1234567890".to_string(),
            vehicle_number: "TEST001".to_string(),
            vehicle_type: "normal".to_string(),
            password: DEMO_PASSWORD.to_string(),
        };

        match SignUpUseCase::new(self.user_repo.clone()).execute(input).await {
            Ok(_) => Ok(SeedOutcome::Created),
            // Lost a race with another instance
            Err(AuthError::DuplicateEmail) => Ok(SeedOutcome::AlreadyPresent),
            Err(e) => Err(e),
        }
    }
}
