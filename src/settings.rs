//! User settings stored as settings.json in the app data directory

use crate::constants::DEFAULT_SERVER_URL;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Server
    pub server_url: Option<String>,

    // Sign-in form
    pub remember_email: bool,
    pub last_email: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            server_url: None,
            remember_email: true,
            last_email: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    pub fn server_url_or_default(&self) -> String {
        self.server_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_falls_back_to_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert!(settings.remember_email);
        assert_eq!(settings.last_email, None);
        assert_eq!(settings.server_url_or_default(), DEFAULT_SERVER_URL);
    }

    #[test]
    fn settings_round_trip() {
        let settings = Settings {
            window_w: Some(460.0),
            server_url: Some("https://tickets.example.com".into()),
            remember_email: false,
            last_email: Some("alice@example.com".into()),
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.window_w, Some(460.0));
        assert_eq!(back.server_url_or_default(), "https://tickets.example.com");
        assert!(!back.remember_email);
        assert_eq!(back.last_email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let settings: Settings =
            serde_json::from_str(r#"{"server_url": "http://local:9000", "col_stars": true}"#)
                .unwrap();
        assert_eq!(settings.server_url_or_default(), "http://local:9000");
    }
}
