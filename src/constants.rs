//! Application constants and configuration

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
pub const AUTH_TOKEN_PATH: &str = "/api/users/request-auth-token";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
