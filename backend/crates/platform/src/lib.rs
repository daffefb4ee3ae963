//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no business vocabulary:
//! - Password hashing (Argon2id)
//! - Bearer token signing and verification (JWT, HMAC)
//! - `Authorization` header parsing

pub mod bearer;
pub mod password;
pub mod token;
