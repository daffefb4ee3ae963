//! Check Health Use Case
//!
//! Reports store reachability. Never fails; an unreachable store is
//! reported in the output instead.

use std::sync::Arc;

use crate::domain::repository::{StoreBackend, UserRepository};

/// Health report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthOutput {
    Healthy {
        backend: StoreBackend,
        users_count: u64,
    },
    Unhealthy {
        backend: StoreBackend,
        error: String,
    },
}

/// Check health use case
pub struct CheckHealthUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> CheckHealthUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self) -> HealthOutput {
        let backend = self.user_repo.backend();

        match self.user_repo.count(None).await {
            Ok(users_count) => HealthOutput::Healthy {
                backend,
                users_count,
            },
            Err(e) => {
                tracing::error!(backend = %backend, error = %e, "Health check failed");
                HealthOutput::Unhealthy {
                    backend,
                    error: "User store unreachable".to_string(),
                }
            }
        }
    }
}
