//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by every backend crate:
//! - The wire error type and its HTTP classification
//! - Typed entity identifiers
//!
//! Only things with a stable meaning across all crates belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
