//! Common types and data structures

use crate::user::User;
use serde::{Deserialize, Serialize};

/// Authentication state shared between the UI and the request task
#[derive(Clone, PartialEq)]
pub enum AuthState {
    SignedOut,
    Pending,
    Failed(String),
    SignedIn(User),
}

impl AuthState {
    /// Error message to surface on the form, if any
    pub fn error(&self) -> Option<&str> {
        match self {
            AuthState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Credentials sent to the token endpoint
#[derive(Serialize)]
pub struct TokenRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Token endpoint response body. The server sends more (resource hrefs
/// for the account), only the signed token is used here.
#[derive(Deserialize)]
pub struct TokenResponse {
    pub key: String,
}

/// Claims carried by the auth token
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_ignores_extra_fields() {
        let body = r#"{"key": "abc.def.ghi", "user": {"href": "/api/users/42"}}"#;
        let parsed: TokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.key, "abc.def.ghi");
    }

    #[test]
    fn token_response_requires_key() {
        let body = r#"{"token": "abc.def.ghi"}"#;
        assert!(serde_json::from_str::<TokenResponse>(body).is_err());
    }

    #[test]
    fn token_request_serializes_credentials() {
        let request = TokenRequest {
            email: "alice@example.com",
            password: "hunter2hunter2",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["email"], "alice@example.com");
        assert_eq!(json["password"], "hunter2hunter2");
    }
}
