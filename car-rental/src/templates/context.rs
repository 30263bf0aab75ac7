//! Data every page layout needs: flash messages, the anti-forgery token,
//! the current path and the signed-in user.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::error::Error;
use crate::session::{AuthContext, CsrfToken, FlashMessage, FlashMessages};

/// Common context embedded in every template as `ctx`.
///
/// As an extractor it consumes the session's pending flash messages, so it
/// should only be extracted by handlers that render a page.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    pub flash_messages: Vec<FlashMessage>,
    pub csrf_token: Option<String>,
    pub current_path: String,
    pub is_authenticated: bool,
    pub is_admin: bool,
    pub user_name: Option<String>,
}

impl TemplateContext {
    /// Context without session data, used for error pages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.current_path = path.into();
        self
    }

    #[must_use]
    pub fn with_auth(mut self, auth: &AuthContext) -> Self {
        self.is_authenticated = auth.is_authenticated;
        self.is_admin = auth.is_admin();
        self.user_name = auth.user_name.clone();
        self
    }

    #[must_use]
    pub fn with_csrf(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_flash(mut self, messages: Vec<FlashMessage>) -> Self {
        self.flash_messages = messages;
        self
    }

    #[must_use]
    pub fn has_flash(&self) -> bool {
        !self.flash_messages.is_empty()
    }

    /// Name shown in the navigation bar.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or("")
    }

    /// Hidden `_csrf` input for forms.
    #[must_use]
    pub fn csrf_field(&self) -> String {
        match &self.csrf_token {
            Some(token) => format!(
                r#"<input type="hidden" name="_csrf" value="{}">"#,
                html_escape(token)
            ),
            None => String::new(),
        }
    }

    /// Whether the navigation entry for `prefix` is the current section.
    #[must_use]
    pub fn is_section(&self, prefix: &str) -> bool {
        self.current_path == prefix
            || self
                .current_path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/') || rest.starts_with('?'))
    }
}

impl<S> FromRequestParts<S> for TemplateContext
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthContext::from_request_parts(parts, state).await?;
        let csrf = CsrfToken::from_request_parts(parts, state).await?;

        let session = parts.extensions.get::<Session>().cloned().ok_or_else(|| {
            Error::Session("Session not found in request extensions".to_string())
        })?;
        let flash = FlashMessages::take(&session).await?;

        Ok(Self::new()
            .with_path(parts.uri.path())
            .with_auth(&auth)
            .with_csrf(csrf.token())
            .with_flash(flash.into_messages()))
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csrf_field_is_escaped() {
        let ctx = TemplateContext::new().with_csrf("a\"b");
        assert_eq!(
            ctx.csrf_field(),
            r#"<input type="hidden" name="_csrf" value="a&quot;b">"#
        );
        assert_eq!(TemplateContext::new().csrf_field(), "");
    }

    #[test]
    fn test_has_flash() {
        assert!(!TemplateContext::new().has_flash());
        let ctx = TemplateContext::new().with_flash(vec![FlashMessage::success("Car saved.")]);
        assert!(ctx.has_flash());
    }

    #[test]
    fn test_section_matching() {
        let ctx = TemplateContext::new().with_path("/Cars/Edit/3");
        assert!(ctx.is_section("/Cars"));
        assert!(!ctx.is_section("/CarClasses"));
        assert!(TemplateContext::new().with_path("/Cars").is_section("/Cars"));
    }

    #[test]
    fn test_with_auth() {
        let auth = AuthContext {
            is_authenticated: true,
            roles: vec!["Admin".to_string()],
            user_id: Some("u1".to_string()),
            user_name: Some("root".to_string()),
        };
        let ctx = TemplateContext::new().with_auth(&auth);
        assert!(ctx.is_admin);
        assert_eq!(ctx.display_name(), "root");
    }
}
