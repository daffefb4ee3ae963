//! Application Layer
//!
//! Use cases and application services.

pub mod access_guard;
pub mod check_health;
pub mod config;
pub mod log_in;
pub mod seed;
pub mod sign_up;

// Re-exports
pub use access_guard::{AccessClaims, AccessGuard, AccessTier};
pub use check_health::{CheckHealthUseCase, HealthOutput};
pub use config::{AuthConfig, ConfigError, StoreConfig};
pub use log_in::{LogInInput, LogInOutput, LogInUseCase};
pub use seed::{SeedDemoUserUseCase, SeedOutcome};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
