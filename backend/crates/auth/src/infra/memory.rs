//! In-Memory Repository
//!
//! Volatile fallback used when the database cannot be reached at startup.
//! Contents are lost on restart.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::{StoreBackend, UserFilter, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// In-process user store.
///
/// Reads share the lock; `insert` holds the write lock across the
/// duplicate check and the append, so two concurrent sign-ups for the same
/// email cannot both succeed.
#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == *email).cloned())
    }

    async fn insert(&self, user: User) -> AuthResult<User> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::DuplicateEmail);
        }

        users.push(user.clone());

        tracing::debug!(
            user_id = %user.user_id,
            total = users.len(),
            "Inserted user into volatile store"
        );

        Ok(user)
    }

    async fn count(&self, filter: Option<&UserFilter>) -> AuthResult<u64> {
        let users = self.users.read().await;
        let count = match filter {
            Some(filter) => users.iter().filter(|u| filter.matches(u)).count(),
            None => users.len(),
        };
        Ok(count as u64)
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Volatile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::user::NewUserProfile;
    use crate::domain::value_object::{
        user_password::UserPassword, vehicle_type::VehicleType,
    };

    fn user(email: &str, vehicle_type: VehicleType) -> User {
        User::new(
            NewUserProfile {
                name: "Test User".to_string(),
                email: Email::new(email).unwrap(),
                phone: "1234567890".to_string(),
                vehicle_number: "TEST001".to_string(),
                vehicle_type,
            },
            UserPassword::from_db("$argon2id$placeholder"),
        )
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = MemoryUserRepository::new();
        let inserted = repo.insert(user("a@x.com", VehicleType::Ambulance)).await.unwrap();

        let found = repo
            .find_by_email(&Email::new("a@x.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.user_id, inserted.user_id);
        assert_eq!(found.vehicle_type, VehicleType::Ambulance);

        let missing = repo
            .find_by_email(&Email::new("b@x.com").unwrap())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive() {
        let repo = MemoryUserRepository::new();
        repo.insert(user("A@x.com", VehicleType::Normal)).await.unwrap();

        let found = repo
            .find_by_email(&Email::new("a@x.com").unwrap())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = MemoryUserRepository::new();
        repo.insert(user("a@x.com", VehicleType::Normal)).await.unwrap();

        let err = repo
            .insert(user("a@x.com", VehicleType::Fire))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));
        assert_eq!(repo.count(None).await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_same_email() {
        let repo = MemoryUserRepository::new();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.insert(user("race@x.com", VehicleType::Police)).await })
            })
            .collect();

        let mut ok = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(AuthError::DuplicateEmail) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(repo.count(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_count_with_filter() {
        let repo = MemoryUserRepository::new();
        repo.insert(user("a@x.com", VehicleType::Police)).await.unwrap();
        repo.insert(user("b@x.com", VehicleType::Police)).await.unwrap();
        repo.insert(user("c@x.com", VehicleType::Fire)).await.unwrap();

        assert_eq!(repo.count(None).await.unwrap(), 3);
        assert_eq!(
            repo.count(Some(&UserFilter::vehicle_type(VehicleType::Police)))
                .await
                .unwrap(),
            2
        );
        assert_eq!(
            repo.count(Some(&UserFilter::vehicle_type(VehicleType::Normal)))
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_fresh_store_is_empty() {
        let repo = MemoryUserRepository::new();
        repo.insert(user("a@x.com", VehicleType::Police)).await.unwrap();

        // A new instance models a process restart
        let restarted = MemoryUserRepository::new();
        assert_eq!(restarted.count(None).await.unwrap(), 0);
        assert_eq!(restarted.backend(), StoreBackend::Volatile);
    }
}
