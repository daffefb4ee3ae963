//! Sign Up Use Case
//!
//! Registers a new vehicle operator.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::{NewUserProfile, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
    vehicle_type::VehicleType,
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_number: String,
    /// Unparsed; validated here
    pub vehicle_type: String,
    pub password: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: UserId,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // Validate everything before touching the store
        let vehicle_type: VehicleType = input.vehicle_type.parse()?;
        let email = Email::new(input.email)?;

        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AuthError::InvalidInput("Name cannot be empty".to_string()));
        }

        let raw_password = RawPassword::new(input.password)?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            tracing::info!(email = %email, "Sign up rejected, email already registered");
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = UserPassword::hash_blocking(raw_password).await?;

        let user = User::new(
            NewUserProfile {
                name,
                email,
                phone: input.phone,
                vehicle_number: input.vehicle_number,
                vehicle_type,
            },
            password_hash,
        );

        // The store re-checks uniqueness under its own lock / constraint
        let user = self.user_repo.insert(user).await?;

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            vehicle_type = %user.vehicle_type,
            backend = %self.user_repo.backend(),
            "User signed up"
        );

        Ok(SignUpOutput {
            user_id: user.user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::MemoryUserRepository;

    fn input(email: &str, vehicle_type: &str) -> SignUpInput {
        SignUpInput {
            name: "Test User".to_string(),
            email: email.to_string(),
            phone: "1234567890".to_string(),
            vehicle_number: "AMB001".to_string(),
            vehicle_type: vehicle_type.to_string(),
            password: "pw1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_stores_hashed_password() {
        let repo = Arc::new(MemoryUserRepository::new());
        let use_case = SignUpUseCase::new(repo.clone());

        let output = use_case.execute(input("a@x.com", "ambulance")).await.unwrap();

        let user = repo
            .find_by_email(&Email::new("a@x.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.user_id, output.user_id);
        assert_eq!(user.vehicle_type, VehicleType::Ambulance);
        assert_ne!(user.password_hash.as_phc_string(), "pw1");
        assert!(user.password_hash.verify(&RawPassword::candidate("pw1".to_string())));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = Arc::new(MemoryUserRepository::new());
        let use_case = SignUpUseCase::new(repo.clone());

        use_case.execute(input("a@x.com", "ambulance")).await.unwrap();
        let err = use_case.execute(input("a@x.com", "fire")).await.unwrap_err();

        assert!(matches!(err, AuthError::DuplicateEmail));
        assert_eq!(repo.count(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalid_vehicle_type_rejected_before_insert() {
        let repo = Arc::new(MemoryUserRepository::new());
        let use_case = SignUpUseCase::new(repo.clone());

        for vehicle_type in ["truck", "Ambulance", ""] {
            let err = use_case
                .execute(input("a@x.com", vehicle_type))
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::InvalidInput(_)), "accepted {vehicle_type:?}");
        }
        assert_eq!(repo.count(None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_profile_rejected() {
        let use_case = SignUpUseCase::new(Arc::new(MemoryUserRepository::new()));

        let err = use_case.execute(input("not-an-email", "normal")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));

        let mut blank_name = input("a@x.com", "normal");
        blank_name.name = "   ".to_string();
        let err = use_case.execute(blank_name).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));

        let mut blank_password = input("a@x.com", "normal");
        blank_password.password = String::new();
        let err = use_case.execute(blank_password).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
    }
}
