//! Session configuration types.

use serde::{Deserialize, Serialize};

/// Session configuration.
///
/// # Example
///
/// ```toml
/// [session]
/// cookie_name = ".CarRental.Session"
/// expiry_secs = 3600
/// secure = true
/// http_only = true
/// same_site = "lax"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session cookie name.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Session lifetime in seconds, measured from the last request.
    ///
    /// `0` makes the cookie a browser-session cookie.
    #[serde(default = "default_expiry_secs")]
    pub expiry_secs: u64,

    /// Secure cookie flag (HTTPS only).
    ///
    /// Off by default so the application works over plain HTTP in development.
    #[serde(default)]
    pub secure: bool,

    /// HttpOnly cookie flag.
    #[serde(default = "default_http_only")]
    pub http_only: bool,

    /// SameSite cookie policy: `"strict"`, `"lax"` or `"none"`.
    #[serde(default = "default_same_site")]
    pub same_site: String,

    /// Anti-forgery configuration.
    #[serde(default)]
    pub csrf: CsrfConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            expiry_secs: default_expiry_secs(),
            secure: false,
            http_only: default_http_only(),
            same_site: default_same_site(),
            csrf: CsrfConfig::default(),
        }
    }
}

/// Anti-forgery configuration.
///
/// ```toml
/// [session.csrf]
/// enabled = true
/// token_length = 32
/// header_name = "X-CSRF-Token"
/// form_field_name = "_csrf"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrfConfig {
    /// Require a token on non-safe methods.
    #[serde(default = "default_csrf_enabled")]
    pub enabled: bool,

    /// Token length in characters.
    #[serde(default = "default_token_length")]
    pub token_length: usize,

    /// HTTP header carrying the token.
    #[serde(default = "default_header_name")]
    pub header_name: String,

    /// Form field carrying the token.
    #[serde(default = "default_form_field_name")]
    pub form_field_name: String,

    /// HTTP methods that skip validation.
    #[serde(default = "default_safe_methods")]
    pub safe_methods: Vec<String>,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            enabled: default_csrf_enabled(),
            token_length: default_token_length(),
            header_name: default_header_name(),
            form_field_name: default_form_field_name(),
            safe_methods: default_safe_methods(),
        }
    }
}

fn default_cookie_name() -> String {
    ".CarRental.Session".to_string()
}

fn default_expiry_secs() -> u64 {
    3600
}

fn default_http_only() -> bool {
    true
}

fn default_same_site() -> String {
    "lax".to_string()
}

fn default_csrf_enabled() -> bool {
    true
}

fn default_token_length() -> usize {
    32
}

fn default_header_name() -> String {
    "X-CSRF-Token".to_string()
}

fn default_form_field_name() -> String {
    "_csrf".to_string()
}

fn default_safe_methods() -> Vec<String> {
    vec![
        "GET".to_string(),
        "HEAD".to_string(),
        "OPTIONS".to_string(),
        "TRACE".to_string(),
    ]
}
