//! Signed-in principal stored in the session, and the per-request
//! [`AuthContext`] handed to page controllers.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::Error;

const AUTH_SESSION_KEY: &str = "_auth";

/// Role required for the user administration area.
pub const ADMIN_ROLE: &str = "Admin";

/// Principal persisted in the session after a successful sign-in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthSession {
    /// User ID
    pub user_id: Option<String>,

    /// Display/sign-in name
    #[serde(default)]
    pub user_name: Option<String>,

    /// Role names
    #[serde(default)]
    pub roles: Vec<String>,

    /// Sign-in time (unix timestamp)
    pub authenticated_at: Option<i64>,
}

impl AuthSession {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn login(&mut self, user_id: String, user_name: String, roles: Vec<String>) {
        self.user_id = Some(user_id);
        self.user_name = Some(user_name);
        self.roles = roles;
        self.authenticated_at = Some(chrono::Utc::now().timestamp());
    }

    pub fn logout(&mut self) {
        self.user_id = None;
        self.user_name = None;
        self.roles.clear();
        self.authenticated_at = None;
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Load the principal from the session (default when absent).
    pub async fn load(session: &Session) -> Result<Self, Error> {
        Ok(session
            .get::<Self>(AUTH_SESSION_KEY)
            .await
            .map_err(|e| Error::Session(format!("Failed to read auth session: {e}")))?
            .unwrap_or_default())
    }

    /// Persist the principal into the session.
    pub async fn save(&self, session: &Session) -> Result<(), Error> {
        session
            .insert(AUTH_SESSION_KEY, self)
            .await
            .map_err(|e| Error::Session(format!("Failed to save auth session: {e}")))
    }
}

/// Identity of the caller, resolved once per request.
///
/// Controllers receive this value instead of consulting the session
/// themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub is_authenticated: bool,
    pub roles: Vec<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
}

impl AuthContext {
    /// Context of an anonymous caller.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.is_authenticated && self.roles.iter().any(|r| r == role)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}

impl From<AuthSession> for AuthContext {
    fn from(session: AuthSession) -> Self {
        Self {
            is_authenticated: session.is_authenticated(),
            roles: session.roles,
            user_id: session.user_id,
            user_name: session.user_name,
        }
    }
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<AuthContext>() {
            return Ok(ctx.clone());
        }

        let session = parts.extensions.get::<Session>().cloned().ok_or_else(|| {
            Error::Session("Session not found in request extensions. Is SessionManagerLayer configured?".to_string())
        })?;

        let ctx = AuthContext::from(AuthSession::load(&session).await?);
        parts.extensions.insert(ctx.clone());
        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions_memory_store::MemoryStore;

    #[test]
    fn test_auth_session_login_logout() {
        let mut auth = AuthSession::default();
        assert!(!auth.is_authenticated());

        auth.login(
            "user-123".to_string(),
            "alice".to_string(),
            vec!["Admin".to_string()],
        );
        assert!(auth.is_authenticated());
        assert!(auth.has_role("Admin"));
        assert!(auth.authenticated_at.is_some());

        auth.logout();
        assert!(!auth.is_authenticated());
        assert!(auth.roles.is_empty());
        assert!(auth.user_name.is_none());
    }

    #[test]
    fn test_auth_context_from_session() {
        let mut auth = AuthSession::default();
        auth.login("u1".to_string(), "bob".to_string(), vec!["User".to_string()]);

        let ctx = AuthContext::from(auth);
        assert!(ctx.is_authenticated);
        assert_eq!(ctx.user_name.as_deref(), Some("bob"));
        assert!(ctx.has_role("User"));
        assert!(!ctx.is_admin());
    }

    #[test]
    fn test_anonymous_context_has_no_roles() {
        let ctx = AuthContext {
            roles: vec![ADMIN_ROLE.to_string()],
            ..AuthContext::anonymous()
        };
        // roles without an authenticated principal grant nothing
        assert!(!ctx.is_admin());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip_through_session() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        assert!(!AuthSession::load(&session).await.unwrap().is_authenticated());

        let mut auth = AuthSession::default();
        auth.login("u9".to_string(), "carol".to_string(), vec![]);
        auth.save(&session).await.unwrap();

        let loaded = AuthSession::load(&session).await.unwrap();
        assert_eq!(loaded.user_id.as_deref(), Some("u9"));
    }
}
