//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer; callers depend only on these traits.

use serde::Serialize;
use std::fmt;

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, vehicle_type::VehicleType};
use crate::error::AuthResult;

/// Which concrete backend is serving the user store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// External persistent database
    Durable,
    /// In-process store, lost on restart
    Volatile,
}

impl StoreBackend {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Durable => "durable",
            StoreBackend::Volatile => "volatile",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact-match predicate for [`UserRepository::count`].
///
/// Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub email: Option<Email>,
    pub vehicle_type: Option<VehicleType>,
}

impl UserFilter {
    pub fn vehicle_type(vehicle_type: VehicleType) -> Self {
        Self {
            vehicle_type: Some(vehicle_type),
            ..Self::default()
        }
    }

    pub fn matches(&self, user: &User) -> bool {
        self.email.as_ref().is_none_or(|email| *email == user.email)
            && self
                .vehicle_type
                .is_none_or(|vehicle_type| vehicle_type == user.vehicle_type)
    }
}

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by email (exact match)
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Insert a new user.
    ///
    /// Fails with `AuthError::DuplicateEmail` if the email is taken.
    async fn insert(&self, user: User) -> AuthResult<User>;

    /// Count users matching `filter` (all users when `None`)
    async fn count(&self, filter: Option<&UserFilter>) -> AuthResult<u64>;

    /// Backend serving this repository
    fn backend(&self) -> StoreBackend;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::user::NewUserProfile;
    use crate::domain::value_object::user_password::UserPassword;

    fn user(email: &str, vehicle_type: VehicleType) -> User {
        User::new(
            NewUserProfile {
                name: "Test".to_string(),
                email: Email::new(email).unwrap(),
                phone: "1234567890".to_string(),
                vehicle_number: "TEST001".to_string(),
                vehicle_type,
            },
            UserPassword::from_db("$argon2id$placeholder"),
        )
    }

    #[test]
    fn test_filter_matches() {
        let u = user("a@x.com", VehicleType::Police);

        assert!(UserFilter::default().matches(&u));
        assert!(UserFilter::vehicle_type(VehicleType::Police).matches(&u));
        assert!(!UserFilter::vehicle_type(VehicleType::Fire).matches(&u));

        let by_email = UserFilter {
            email: Some(Email::new("a@x.com").unwrap()),
            vehicle_type: None,
        };
        assert!(by_email.matches(&u));
        assert!(!by_email.matches(&user("b@x.com", VehicleType::Police)));
    }
}
