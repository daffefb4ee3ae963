//! User Password Value Objects
//!
//! Domain wrappers over `platform::password`.
//!
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("pw1".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw).unwrap();
//! assert!(hashed.verify(&raw));
//! ```

use platform::password::{ClearTextPassword, HashedPassword};
use std::fmt;
use std::sync::LazyLock;

use crate::error::AuthResult;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Password exactly as the user typed it. Zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a new password at sign-up.
    ///
    /// ## Errors
    /// `AuthError::InvalidInput` when the password is empty, too long,
    /// or contains control characters.
    pub fn new(raw: String) -> AuthResult<Self> {
        Ok(Self(ClearTextPassword::new(raw)?))
    }

    /// Wrap a login attempt. No policy is applied.
    pub fn candidate(raw: String) -> Self {
        Self(ClearTextPassword::candidate(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id PHC string as persisted with the user.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

/// Verified against when a login names no stored user.
static DUMMY_HASH: LazyLock<UserPassword> = LazyLock::new(|| {
    let raw = RawPassword::candidate("no-such-user".to_string());
    UserPassword::from_raw(&raw).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to prepare dummy password hash");
        UserPassword::from_db(String::new())
    })
});

impl UserPassword {
    pub fn from_raw(raw: &RawPassword) -> AuthResult<Self> {
        Ok(Self(raw.0.hash()?))
    }

    /// Wrap a stored hash; corrupt values just fail verification.
    pub fn from_db(phc_string: impl Into<String>) -> Self {
        Self(HashedPassword::from_stored(phc_string))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword) -> bool {
        self.0.verify(&raw.0)
    }

    /// A real Argon2id hash that belongs to nobody. Checking a login against
    /// it costs the same as checking against a stored user.
    pub fn dummy() -> &'static UserPassword {
        &DUMMY_HASH
    }

    /// [`UserPassword::from_raw`] on the blocking pool.
    pub async fn hash_blocking(raw: RawPassword) -> AuthResult<Self> {
        tokio::task::spawn_blocking(move || Self::from_raw(&raw)).await?
    }

    /// [`UserPassword::verify`] on the blocking pool.
    pub async fn verify_blocking(self, raw: RawPassword) -> AuthResult<bool> {
        Ok(tokio::task::spawn_blocking(move || self.verify(&raw)).await?)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("pw1".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw).unwrap();

        assert!(hashed.verify(&raw));
        assert!(!hashed.verify(&RawPassword::candidate("pw2".to_string())));
    }

    #[test]
    fn test_policy_violation_is_invalid_input() {
        let err = RawPassword::new("   ".to_string()).unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
    }

    #[test]
    fn test_stored_hash_round_trip() {
        let raw = RawPassword::new("pw1".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw).unwrap();

        let restored = UserPassword::from_db(hashed.as_phc_string());
        assert!(restored.verify(&raw));
        assert!(!UserPassword::from_db("garbage").verify(&raw));
    }

    #[test]
    fn test_dummy_hash_is_real_argon2id() {
        let dummy = UserPassword::dummy();
        assert!(dummy.as_phc_string().starts_with("$argon2id$"));
        assert!(!dummy.verify(&RawPassword::candidate("pw1".to_string())));
        assert!(!dummy.verify(&RawPassword::candidate(String::new())));
    }

    #[tokio::test]
    async fn test_blocking_pool_hash_and_verify() {
        let raw = RawPassword::new("pw1".to_string()).unwrap();
        let hashed = UserPassword::hash_blocking(raw).await.unwrap();

        let ok = hashed
            .clone()
            .verify_blocking(RawPassword::candidate("pw1".to_string()))
            .await
            .unwrap();
        let wrong = hashed
            .verify_blocking(RawPassword::candidate("pw2".to_string()))
            .await
            .unwrap();
        assert!(ok);
        assert!(!wrong);
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword".to_string()).unwrap();
        assert!(!format!("{:?}", raw).contains("Secret"));
    }
}
