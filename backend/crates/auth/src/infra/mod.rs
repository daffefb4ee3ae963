//! Infrastructure Layer
//!
//! User store backends and startup backend selection.

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryUserRepository;
pub use postgres::PgUserRepository;
pub use store::UserStore;
