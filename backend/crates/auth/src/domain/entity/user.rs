//! User Entity
//!
//! A registered vehicle operator. Created once at sign-up and never
//! modified afterwards.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email, user_password::UserPassword, vehicle_type::VehicleType,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Unique lookup key
    pub email: Email,
    pub phone: String,
    pub vehicle_number: String,
    /// Vehicle class, also the access role
    pub vehicle_type: VehicleType,
    pub password_hash: UserPassword,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
}

/// Profile fields of a new registration
#[derive(Debug, Clone)]
pub struct NewUserProfile {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub vehicle_number: String,
    pub vehicle_type: VehicleType,
}

impl User {
    /// Create a new user with a fresh id and `created_at = now`
    pub fn new(profile: NewUserProfile, password_hash: UserPassword) -> Self {
        Self {
            user_id: UserId::new(),
            name: profile.name,
            email: profile.email,
            phone: profile.phone,
            vehicle_number: profile.vehicle_number,
            vehicle_type: profile.vehicle_type,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
