//! One-shot flash messages for the post-redirect-get pattern.
//!
//! A handler pushes a message before redirecting; the next rendered page
//! reads and clears it.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::Error;

const FLASH_SESSION_KEY: &str = "_flash_messages";

/// Flash message severity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Info,
    Warning,
    Error,
}

impl FlashKind {
    /// CSS class used by the layout template.
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "flash-success",
            Self::Info => "flash-info",
            Self::Warning => "flash-warning",
            Self::Error => "flash-error",
        }
    }
}

/// A single flash message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub message: String,
}

impl FlashMessage {
    #[must_use]
    pub fn new(kind: FlashKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashKind::Success, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(FlashKind::Warning, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FlashKind::Error, message)
    }
}

/// Extractor that consumes the pending flash messages.
pub struct FlashMessages {
    messages: Vec<FlashMessage>,
}

impl FlashMessages {
    #[must_use]
    pub fn messages(&self) -> &[FlashMessage] {
        &self.messages
    }

    #[must_use]
    pub fn into_messages(self) -> Vec<FlashMessage> {
        self.messages
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Queue a message for the next rendered page.
    pub async fn push(session: &Session, message: FlashMessage) -> Result<(), Error> {
        let mut messages: Vec<FlashMessage> = session
            .get(FLASH_SESSION_KEY)
            .await
            .map_err(|e| Error::Session(format!("Failed to read flash messages: {e}")))?
            .unwrap_or_default();

        messages.push(message);

        session
            .insert(FLASH_SESSION_KEY, &messages)
            .await
            .map_err(|e| Error::Session(format!("Failed to write flash messages: {e}")))
    }

    /// Read and clear the pending messages.
    pub async fn take(session: &Session) -> Result<Self, Error> {
        let messages: Vec<FlashMessage> = session
            .remove(FLASH_SESSION_KEY)
            .await
            .map_err(|e| Error::Session(format!("Failed to read flash messages: {e}")))?
            .unwrap_or_default();

        Ok(Self { messages })
    }
}

impl<S> FromRequestParts<S> for FlashMessages
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts.extensions.get::<Session>().cloned().ok_or_else(|| {
            Error::Session("Session not found in request extensions for flash messages".to_string())
        })?;

        Self::take(&session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions_memory_store::MemoryStore;

    #[test]
    fn test_flash_message_constructors() {
        let success = FlashMessage::success("Car created.");
        assert_eq!(success.kind, FlashKind::Success);
        assert_eq!(success.message, "Car created.");

        assert_eq!(FlashMessage::error("Failed").kind, FlashKind::Error);
        assert_eq!(FlashMessage::warning("Careful").kind, FlashKind::Warning);
    }

    #[test]
    fn test_flash_kind_css_class() {
        assert_eq!(FlashKind::Success.css_class(), "flash-success");
        assert_eq!(FlashKind::Error.css_class(), "flash-error");
        assert_eq!(FlashKind::Warning.css_class(), "flash-warning");
        assert_eq!(FlashKind::Info.css_class(), "flash-info");
    }

    #[tokio::test]
    async fn test_messages_are_consumed_once() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        FlashMessages::push(&session, FlashMessage::success("Saved")).await.unwrap();
        FlashMessages::push(&session, FlashMessage::warning("Check the dates"))
            .await
            .unwrap();

        let first = FlashMessages::take(&session).await.unwrap();
        assert_eq!(first.messages().len(), 2);
        assert_eq!(first.messages()[0].message, "Saved");

        let second = FlashMessages::take(&session).await.unwrap();
        assert!(second.is_empty());
    }
}
