//! Access Guard
//!
//! Bearer token authentication and role-tier authorization.

use std::sync::Arc;

use chrono::TimeDelta;
use platform::token::TokenCodec;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::vehicle_type::VehicleType;
use crate::error::{AuthError, AuthResult};

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub email: String,
    #[serde(rename = "vehicleType")]
    pub vehicle_type: VehicleType,
    pub name: String,
}

impl AccessClaims {
    pub fn for_user(user: &User) -> Self {
        Self {
            email: user.email.as_str().to_string(),
            vehicle_type: user.vehicle_type,
            name: user.name.clone(),
        }
    }
}

/// Route priority tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTier {
    /// Ambulance and fire only
    HighPriority,
    /// All emergency vehicles
    MediumPriority,
    /// Any authenticated user
    General,
}

impl AccessTier {
    pub const fn allowed(&self) -> &'static [VehicleType] {
        use VehicleType::*;
        match self {
            AccessTier::HighPriority => &[Ambulance, Fire],
            AccessTier::MediumPriority => &[Ambulance, Fire, Police],
            AccessTier::General => &VehicleType::ALL,
        }
    }

    pub fn permits(&self, vehicle_type: VehicleType) -> bool {
        self.allowed().contains(&vehicle_type)
    }
}

/// Verifies bearer tokens and checks role membership
#[derive(Debug, Clone)]
pub struct AccessGuard {
    codec: Arc<TokenCodec>,
}

impl AccessGuard {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Sign an access token for `claims`
    pub fn issue(&self, claims: &AccessClaims, ttl: TimeDelta) -> AuthResult<String> {
        Ok(self.codec.issue(claims, ttl)?)
    }

    /// Verify a bearer token and return its claims
    pub fn authenticate(&self, token: &str) -> AuthResult<AccessClaims> {
        let verified = self.codec.verify::<AccessClaims>(token)?;
        Ok(verified.claims)
    }

    /// Check that the claims' role is in `allowed`
    pub fn authorize(claims: AccessClaims, allowed: &[VehicleType]) -> AuthResult<AccessClaims> {
        if allowed.contains(&claims.vehicle_type) {
            return Ok(claims);
        }

        Err(AuthError::Forbidden {
            required: allowed.to_vec(),
            actual: claims.vehicle_type,
        })
    }

    /// Authenticate, then authorize against `tier`
    pub fn check(&self, token: &str, tier: AccessTier) -> AuthResult<AccessClaims> {
        let claims = self.authenticate(token)?;
        Self::authorize(claims, tier.allowed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::token::{SigningAlgorithm, SigningSecret};

    fn guard(fill: u8) -> AccessGuard {
        let secret = SigningSecret::new(vec![fill; 32]).unwrap();
        AccessGuard::new(Arc::new(TokenCodec::new(&secret, SigningAlgorithm::Hs256)))
    }

    fn claims(vehicle_type: VehicleType) -> AccessClaims {
        AccessClaims {
            email: "a@x.com".to_string(),
            vehicle_type,
            name: "Test User".to_string(),
        }
    }

    #[test]
    fn test_claims_use_camel_case_role_key() {
        let json = serde_json::to_value(claims(VehicleType::Ambulance)).unwrap();
        assert_eq!(json["vehicleType"], "ambulance");
        assert_eq!(json["email"], "a@x.com");
    }

    #[test]
    fn test_tier_membership() {
        use VehicleType::*;

        assert!(AccessTier::HighPriority.permits(Ambulance));
        assert!(AccessTier::HighPriority.permits(Fire));
        assert!(!AccessTier::HighPriority.permits(Police));
        assert!(!AccessTier::HighPriority.permits(Normal));

        assert!(AccessTier::MediumPriority.permits(Police));
        assert!(!AccessTier::MediumPriority.permits(Normal));

        for vehicle_type in VehicleType::ALL {
            assert!(AccessTier::General.permits(vehicle_type));
        }
    }

    #[test]
    fn test_token_accepted_before_ttl() {
        let guard = guard(3);
        let token = guard
            .issue(&claims(VehicleType::Police), TimeDelta::minutes(60))
            .unwrap();

        let verified = guard.authenticate(&token).unwrap();
        assert_eq!(verified, claims(VehicleType::Police));
    }

    #[test]
    fn test_token_rejected_after_ttl() {
        let guard = guard(3);
        let token = guard
            .issue(&claims(VehicleType::Police), TimeDelta::seconds(-1))
            .unwrap();

        assert!(matches!(
            guard.authenticate(&token),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let token = guard(1)
            .issue(&claims(VehicleType::Fire), TimeDelta::minutes(5))
            .unwrap();

        assert!(matches!(
            guard(2).authenticate(&token),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn test_police_tiers() {
        let guard = guard(4);
        let token = guard
            .issue(&claims(VehicleType::Police), TimeDelta::minutes(5))
            .unwrap();

        assert!(guard.check(&token, AccessTier::MediumPriority).is_ok());
        assert!(guard.check(&token, AccessTier::General).is_ok());

        match guard.check(&token, AccessTier::HighPriority) {
            Err(AuthError::Forbidden { required, actual }) => {
                assert_eq!(required, vec![VehicleType::Ambulance, VehicleType::Fire]);
                assert_eq!(actual, VehicleType::Police);
            }
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }
}
