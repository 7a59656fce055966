//! Sign-in and sign-out actions

use super::App;
use eframe::egui;
use tracing::info;

/// Local checks mirroring the server's login form constraints; a request
/// that would be rejected outright is never sent.
pub(crate) fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    if !email_looks_valid(email) {
        return Err("Enter a valid email address".into());
    }
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".into());
    }
    if password.len() > 255 {
        return Err("Password is too long".into());
    }
    Ok(())
}

fn email_looks_valid(email: &str) -> bool {
    if email.is_empty() || email.len() > 255 {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !local.is_empty()
        && !host.is_empty()
        && !domain.contains('@')
        && (2..=6).contains(&tld.len())
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

impl App {
    /// Submit the sign-in form. Validates locally, then spawns the
    /// authentication request onto the app runtime.
    pub fn submit_login(&mut self, ctx: &egui::Context) {
        let email = self.email.trim().to_string();

        if let Err(msg) = validate_credentials(&email, &self.password) {
            self.auth.fail(msg);
            return;
        }

        let Some(task) = self.auth.authenticate(email.clone(), self.password.clone()) else {
            return;
        };

        info!(email = %email, "Authentication request started");

        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            task.await;
            ctx.request_repaint();
        });
    }

    pub fn sign_out(&mut self) {
        self.auth.sign_out();
        self.password.clear();
    }

    /// Called every frame: reacts to the pending request finishing.
    pub fn poll_auth(&mut self) {
        let pending = self.auth.is_pending();
        if self.was_pending && !pending {
            if let Some(user) = self.auth.user() {
                self.close_login();
                self.toast(format!("Signed in as {}", user.id));
                self.save_settings();
            }
        }
        self.was_pending = pending;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_address_and_password() {
        assert!(validate_credentials("alice@example.com", "password123").is_ok());
        assert!(validate_credentials("a.b+c@mail.example.org", "12345678").is_ok());
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in [
            "",
            "alice",
            "alice@",
            "@example.com",
            "alice@example",
            "alice@example.c",
            "alice@example.toolongtld",
            "alice@example.c0m",
            "alice@@example.com",
        ] {
            assert!(
                validate_credentials(email, "password123").is_err(),
                "accepted {email:?}"
            );
        }
    }

    #[test]
    fn rejects_short_password() {
        let err = validate_credentials("alice@example.com", "short").unwrap_err();
        assert!(err.contains("at least 8"));
    }

    #[test]
    fn rejects_oversized_inputs() {
        let long_email = format!("{}@example.com", "a".repeat(250));
        assert!(validate_credentials(&long_email, "password123").is_err());
        assert!(validate_credentials("alice@example.com", &"x".repeat(256)).is_err());
    }
}
