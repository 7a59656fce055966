//! Authenticated user model

use crate::types::TokenClaims;
use chrono::{DateTime, Utc};

/// The signed-in user, built from the auth token's claims.
/// Exists only while the session does; nothing is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub expires_at: DateTime<Utc>,
}

impl User {
    /// Build a user from decoded token claims. `exp` is Unix seconds.
    pub fn from_claims(claims: &TokenClaims) -> Option<Self> {
        let expires_at = DateTime::from_timestamp(claims.exp, 0)?;
        Some(Self {
            id: claims.sub.clone(),
            expires_at,
        })
    }

    /// Whether the token expiry lies in the past. Display only - the
    /// server is the authority on whether the token is still accepted.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn from_claims_maps_subject_and_expiry() {
        let claims = TokenClaims {
            sub: "alice@example.com".into(),
            exp: 1_700_000_000,
        };
        let user = User::from_claims(&claims).unwrap();
        assert_eq!(user.id, "alice@example.com");
        assert_eq!(user.expires_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn from_claims_rejects_out_of_range_expiry() {
        let claims = TokenClaims {
            sub: "alice@example.com".into(),
            exp: i64::MAX,
        };
        assert!(User::from_claims(&claims).is_none());
    }

    #[test]
    fn expiry_in_future_is_not_expired() {
        let user = User {
            id: "alice@example.com".into(),
            expires_at: Utc::now() + Duration::hours(1),
        };
        assert!(!user.is_expired());
    }

    #[test]
    fn expiry_in_past_is_expired() {
        let user = User {
            id: "alice@example.com".into(),
            expires_at: Utc::now() - Duration::hours(1),
        };
        assert!(user.is_expired());
    }
}
