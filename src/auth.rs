//! Authentication service: exchanges credentials for a signed token

use crate::constants::AUTH_TOKEN_PATH;
use crate::types::{AuthState, TokenClaims, TokenRequest, TokenResponse};
use crate::user::User;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::future::Future;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

/// Client-side authentication against the Ticketbox token endpoint.
///
/// Holds the one piece of shared mutable state in the app: the current
/// [`AuthState`]. The request task updates it from the runtime; the UI
/// reads it every frame.
pub struct AuthService {
    base_url: String,
    client: reqwest::Client,
    state: Arc<Mutex<AuthState>>,
}

impl AuthService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            state: Arc::new(Mutex::new(AuthState::SignedOut)),
        }
    }

    /// Snapshot of the current auth state
    pub fn state(&self) -> AuthState {
        self.state.lock().unwrap().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.lock().unwrap(), AuthState::SignedIn(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(*self.state.lock().unwrap(), AuthState::Pending)
    }

    /// The authenticated user, if any
    pub fn user(&self) -> Option<User> {
        match &*self.state.lock().unwrap() {
            AuthState::SignedIn(user) => Some(user.clone()),
            _ => None,
        }
    }

    /// Record a failure without issuing a request (e.g. local form
    /// validation); the message lands on the same error surface.
    pub fn fail(&self, message: impl Into<String>) {
        *self.state.lock().unwrap() = AuthState::Failed(message.into());
    }

    /// Drop the in-memory user
    pub fn sign_out(&self) {
        let mut state = self.state.lock().unwrap();
        if let AuthState::SignedIn(user) = &*state {
            info!(user = %user.id, "Signed out");
        }
        *state = AuthState::SignedOut;
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the authentication task for these credentials, flipping the
    /// state to `Pending`. Returns `None` if a request is already in
    /// flight - one outstanding request at a time.
    pub fn authenticate(
        &self,
        email: String,
        password: String,
    ) -> Option<impl Future<Output = ()> + Send + 'static> {
        {
            let mut state = self.state.lock().unwrap();
            if matches!(*state, AuthState::Pending) {
                debug!("Authentication request already in flight, ignoring");
                return None;
            }
            *state = AuthState::Pending;
        }

        let client = self.client.clone();
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), AUTH_TOKEN_PATH);
        let state = self.state.clone();

        Some(async move {
            let result = request_token(&client, &url, &email, &password).await;
            let mut s = state.lock().unwrap();
            match result {
                Ok(user) => {
                    info!(user = %user.id, expires = %user.expires_at, "Authenticated");
                    *s = AuthState::SignedIn(user);
                }
                Err(e) => {
                    error!(error = %e, "Authentication failed");
                    *s = AuthState::Failed(e);
                }
            }
        })
    }
}

/// POST the credentials and turn the response into a user.
async fn request_token(
    client: &reqwest::Client,
    url: &str,
    email: &str,
    password: &str,
) -> Result<User, String> {
    debug!(url, "Requesting auth token");

    let response = client
        .post(url)
        .json(&TokenRequest { email, password })
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("Authentication failed: HTTP {}", status.as_u16()));
    }

    let body: TokenResponse = response.json().await.map_err(|e| e.to_string())?;
    user_from_token(&body.key)
}

/// Decode the token's claims and build a [`User`] from them.
///
/// The signature is NOT verified: the claims feed client-side display
/// only, the server re-validates the token on every request it receives.
pub fn user_from_token(token: &str) -> Result<User, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;

    let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| e.to_string())?;

    User::from_claims(&data.claims).ok_or_else(|| "Token expiry out of range".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn make_token(sub: &str, exp: i64) -> String {
        let claims = TokenClaims {
            sub: sub.into(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("server-side-secret".as_ref()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_yields_user() {
        let token = make_token("alice@example.com", 2_000_000_000);
        let user = user_from_token(&token).unwrap();
        assert_eq!(user.id, "alice@example.com");
        assert_eq!(user.expires_at.timestamp(), 2_000_000_000);
    }

    #[test]
    fn expired_token_still_decodes() {
        // Expiry is display-only on the client
        let token = make_token("alice@example.com", 1_000_000);
        let user = user_from_token(&token).unwrap();
        assert!(user.is_expired());
    }

    #[test]
    fn garbage_token_is_an_error() {
        assert!(user_from_token("not-a-jwt").is_err());
        assert!(user_from_token("").is_err());
    }

    #[test]
    fn token_without_subject_is_an_error() {
        #[derive(serde::Serialize)]
        struct NoSub {
            exp: i64,
        }
        let token = encode(
            &Header::default(),
            &NoSub { exp: 2_000_000_000 },
            &EncodingKey::from_secret("server-side-secret".as_ref()),
        )
        .unwrap();
        assert!(user_from_token(&token).is_err());
    }

    #[test]
    fn authenticate_allows_one_outstanding_request() {
        let auth = AuthService::new("http://localhost:8080");
        let first = auth.authenticate("a@b.com".into(), "password123".into());
        assert!(first.is_some());
        assert!(auth.is_pending());
        // Second submit while pending is a no-op
        let second = auth.authenticate("a@b.com".into(), "password123".into());
        assert!(second.is_none());
    }

    #[test]
    fn fail_and_sign_out_transitions() {
        let auth = AuthService::new("http://localhost:8080");
        assert!(!auth.is_authenticated());
        assert_eq!(auth.state().error(), None);

        auth.fail("Enter a valid email address");
        assert_eq!(auth.state().error(), Some("Enter a valid email address"));
        assert!(!auth.is_authenticated());

        auth.sign_out();
        assert!(matches!(auth.state(), AuthState::SignedOut));
        assert!(auth.user().is_none());
    }

    #[test]
    fn failed_request_lands_in_failed_state() {
        // Nothing listens on the discard port; the task must surface the
        // transport error through the normal failure path.
        let auth = AuthService::new("http://127.0.0.1:9");
        let task = auth
            .authenticate("alice@example.com".into(), "password123".into())
            .unwrap();
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(task);
        assert!(matches!(auth.state(), AuthState::Failed(_)));
        assert!(!auth.is_authenticated());

        // The slot frees up for another attempt
        assert!(auth
            .authenticate("alice@example.com".into(), "password123".into())
            .is_some());
    }

    #[test]
    fn base_url_trailing_slash_is_tolerated() {
        let mut auth = AuthService::new("http://localhost:8080/");
        assert_eq!(auth.base_url(), "http://localhost:8080/");
        auth.set_base_url("https://tickets.example.com");
        assert_eq!(auth.base_url(), "https://tickets.example.com");
    }
}
