//! Bearer Token Codec
//!
//! Signs and verifies time-bounded JWTs with a process-wide HMAC secret.
//! Tokens are self-contained: nothing is stored server-side, so a token
//! stays valid until its `exp` passes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimum signing secret length in bytes (256 bits, the HS256 block input)
pub const MIN_SECRET_LENGTH: usize = 32;

// ============================================================================
// Error Types
// ============================================================================

/// Signing secret / algorithm configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    #[error("Signing secret is missing or empty")]
    Missing,

    #[error("Signing secret must be at least {min} bytes (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Unsupported signing algorithm: {0} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),
}

/// Token issue / verify errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, malformed token, wrong algorithm, or expired
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

// ============================================================================
// Signing Secret
// ============================================================================

/// HMAC signing secret. Zeroized on drop; never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, SecretError> {
        let secret = Self(secret.into());

        if secret.0.iter().all(u8::is_ascii_whitespace) {
            return Err(SecretError::Missing);
        }

        if secret.0.len() < MIN_SECRET_LENGTH {
            return Err(SecretError::TooShort {
                min: MIN_SECRET_LENGTH,
                actual: secret.0.len(),
            });
        }

        Ok(secret)
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Signing Algorithm
// ============================================================================

/// HMAC algorithms accepted for bearer tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigningAlgorithm {
    #[default]
    Hs256,
    Hs384,
    Hs512,
}

impl SigningAlgorithm {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SigningAlgorithm::Hs256 => "HS256",
            SigningAlgorithm::Hs384 => "HS384",
            SigningAlgorithm::Hs512 => "HS512",
        }
    }

    const fn jwt(&self) -> Algorithm {
        match self {
            SigningAlgorithm::Hs256 => Algorithm::HS256,
            SigningAlgorithm::Hs384 => Algorithm::HS384,
            SigningAlgorithm::Hs512 => Algorithm::HS512,
        }
    }
}

impl FromStr for SigningAlgorithm {
    type Err = SecretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HS256" => Ok(SigningAlgorithm::Hs256),
            "HS384" => Ok(SigningAlgorithm::Hs384),
            "HS512" => Ok(SigningAlgorithm::Hs512),
            other => Err(SecretError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Codec
// ============================================================================

/// Claims wrapper adding the registered time claims.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<C> {
    #[serde(flatten)]
    claims: C,
    iat: i64,
    exp: i64,
}

/// Verified token contents
#[derive(Debug, Clone)]
pub struct VerifiedToken<C> {
    pub claims: C,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// JWT codec bound to one secret and one algorithm.
pub struct TokenCodec {
    algorithm: SigningAlgorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &SigningSecret, algorithm: SigningAlgorithm) -> Self {
        let mut validation = Validation::new(algorithm.jwt());
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.required_spec_claims = ["exp".to_string()].into_iter().collect();

        Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign `claims` with `exp = now + ttl`.
    pub fn issue<C: Serialize>(&self, claims: &C, ttl: TimeDelta) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Encoding("Token expiry out of range".to_string()))?;

        let envelope = Envelope {
            claims,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        jsonwebtoken::encode(
            &Header::new(self.algorithm.jwt()),
            &envelope,
            &self.encoding_key,
        )
        .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Check signature, algorithm and expiry, then return the claims.
    pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<VerifiedToken<C>, TokenError> {
        let data = jsonwebtoken::decode::<Envelope<C>>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                TokenError::InvalidToken
            })?;

        let envelope = data.claims;
        let issued_at =
            DateTime::from_timestamp(envelope.iat, 0).ok_or(TokenError::InvalidToken)?;
        let expires_at =
            DateTime::from_timestamp(envelope.exp, 0).ok_or(TokenError::InvalidToken)?;

        Ok(VerifiedToken {
            claims: envelope.claims,
            issued_at,
            expires_at,
        })
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
