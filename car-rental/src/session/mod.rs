//! Session management: cookie-backed sessions, anti-forgery tokens, flash
//! messages and the signed-in principal.
//!
//! Sessions are kept in memory (tower-sessions `MemoryStore`); only the
//! session id travels in the cookie.

mod auth;
mod config;
mod csrf;
mod flash;

pub use auth::{AuthContext, AuthSession, ADMIN_ROLE};
pub use config::{CsrfConfig, SessionConfig};
pub use csrf::{CsrfLayer, CsrfMiddleware, CsrfToken};
pub use flash::{FlashKind, FlashMessage, FlashMessages};

pub use tower_sessions::{Expiry, Session, SessionManagerLayer};
pub use tower_sessions_memory_store::MemoryStore;

use time::Duration;
use tower_sessions::cookie::SameSite;

/// Create the in-memory `SessionManagerLayer` from configuration.
pub fn create_memory_session_layer(config: &SessionConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    let expiry = if config.expiry_secs == 0 {
        Expiry::OnSessionEnd
    } else {
        Expiry::OnInactivity(Duration::seconds(
            i64::try_from(config.expiry_secs).unwrap_or(i64::MAX),
        ))
    };

    SessionManagerLayer::new(store)
        .with_name(config.cookie_name.clone())
        .with_expiry(expiry)
        .with_secure(config.secure)
        .with_http_only(config.http_only)
        .with_same_site(parse_same_site(&config.same_site))
        .with_path("/")
}

fn parse_same_site(value: &str) -> SameSite {
    match value.to_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_same_site() {
        assert_eq!(parse_same_site("Strict"), SameSite::Strict);
        assert_eq!(parse_same_site("none"), SameSite::None);
        assert_eq!(parse_same_site("lax"), SameSite::Lax);
        assert_eq!(parse_same_site("bogus"), SameSite::Lax);
    }
}
