//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, access guard, configuration
//! - `infra/` - Durable (PostgreSQL) and volatile (in-memory) user stores
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Sign up with name, email, phone, vehicle number and vehicle type
//! - Log in with email + password, returning a signed bearer token
//! - Role tiers derived from the vehicle type (high / medium / general)
//! - Durable store with an in-memory fallback chosen once at startup
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never logged
//! - Stateless HMAC-signed tokens with a fixed expiry
//! - Unified login failure message (no account enumeration)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{AuthConfig, ConfigError, StoreConfig};
pub use error::{AuthError, AuthResult};
pub use infra::store::UserStore;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
