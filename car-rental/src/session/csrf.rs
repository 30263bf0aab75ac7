//! Anti-forgery (CSRF) protection.
//!
//! A per-session token is generated on first use and stored in the session.
//! Pages render it as a hidden `_csrf` field; [`CsrfLayer`] rejects non-safe
//! requests whose `X-CSRF-Token` header or `_csrf` form field does not match.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{header, request::Parts, Request, StatusCode},
    response::{Html, IntoResponse, Response},
};
use rand::Rng;
use tower_sessions::Session;

use super::config::CsrfConfig;
use crate::error::Error;

const CSRF_SESSION_KEY: &str = "_csrf_token";

/// Largest form body buffered while looking for the token field.
const DEFAULT_FORM_LIMIT: usize = 2 * 1024 * 1024;

/// CSRF token extractor and helper.
///
/// The token is generated and stored in the session if not present yet.
#[derive(Debug, Clone)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Create a token with the given value.
    #[must_use]
    pub fn new(token: String) -> Self {
        Self(token)
    }

    /// Raw token string.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.0
    }

    /// Generate a new random token.
    #[must_use]
    pub fn generate(length: usize) -> Self {
        let token: String = rand::rng()
            .sample_iter(&rand::distr::Alphanumeric)
            .take(length)
            .map(char::from)
            .collect();
        Self(token)
    }

    /// Get the session's token, creating and storing one if needed.
    pub async fn get_or_create(session: &Session, length: usize) -> Result<Self, Error> {
        if let Some(token) = session
            .get::<String>(CSRF_SESSION_KEY)
            .await
            .map_err(|e| Error::Session(format!("Failed to read CSRF token: {e}")))?
        {
            return Ok(Self(token));
        }

        let token = Self::generate(length);
        session
            .insert(CSRF_SESSION_KEY, &token.0)
            .await
            .map_err(|e| Error::Session(format!("Failed to store CSRF token: {e}")))?;
        Ok(token)
    }

    /// Replace the session's token. Called after sign-in and sign-out.
    pub async fn regenerate(session: &Session, length: usize) -> Result<Self, Error> {
        let token = Self::generate(length);
        session
            .insert(CSRF_SESSION_KEY, &token.0)
            .await
            .map_err(|e| Error::Session(format!("Failed to store CSRF token: {e}")))?;
        Ok(token)
    }
}

impl std::fmt::Display for CsrfToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S> FromRequestParts<S> for CsrfToken
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts.extensions.get::<Session>().cloned().ok_or_else(|| {
            Error::Session("Session not found in request extensions for CSRF".to_string())
        })?;

        let length = parts
            .extensions
            .get::<CsrfConfig>()
            .map_or(CsrfConfig::default().token_length, |c| c.token_length);

        Self::get_or_create(&session, length).await
    }
}

/// CSRF protection middleware layer.
///
/// The token can be provided via:
/// - Header: `X-CSRF-Token` (configurable)
/// - Form field: `_csrf` (configurable) in an `application/x-www-form-urlencoded` body
///
/// Must sit inside the session layer.
#[derive(Debug, Clone)]
pub struct CsrfLayer {
    config: CsrfConfig,
    form_limit: usize,
}

impl CsrfLayer {
    /// Create a CSRF layer with the given configuration.
    #[must_use]
    pub fn new(config: CsrfConfig) -> Self {
        Self {
            config,
            form_limit: DEFAULT_FORM_LIMIT,
        }
    }

    /// Limit on the buffered form body.
    #[must_use]
    pub fn with_form_limit(mut self, bytes: usize) -> Self {
        self.form_limit = bytes;
        self
    }
}

impl<S> tower::Layer<S> for CsrfLayer {
    type Service = CsrfMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CsrfMiddleware {
            inner,
            config: self.config.clone(),
            form_limit: self.form_limit,
        }
    }
}

/// CSRF middleware service.
#[derive(Debug, Clone)]
pub struct CsrfMiddleware<S> {
    inner: S,
    config: CsrfConfig,
    form_limit: usize,
}

impl<S> tower::Service<Request<Body>> for CsrfMiddleware<S>
where
    S: tower::Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let config = self.config.clone();
        let form_limit = self.form_limit;
        // The ready service is the one that was polled
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            // Token length is needed by the extractor when generating tokens
            request.extensions_mut().insert(config.clone());

            if !config.enabled {
                return inner.call(request).await;
            }

            let is_safe = config
                .safe_methods
                .iter()
                .any(|m| m.eq_ignore_ascii_case(request.method().as_str()));
            if is_safe {
                return inner.call(request).await;
            }

            let Some(session) = request.extensions().get::<Session>().cloned() else {
                tracing::warn!("CSRF validation failed: no session found");
                return Ok(csrf_error_response());
            };

            let expected_token: Option<String> =
                session.get(CSRF_SESSION_KEY).await.ok().flatten();
            let Some(expected_token) = expected_token else {
                tracing::warn!("CSRF validation failed: no token in session");
                return Ok(csrf_error_response());
            };

            let header_token = request
                .headers()
                .get(config.header_name.as_str())
                .and_then(|v| v.to_str().ok())
                .map(String::from);

            let (request, provided_token) = match header_token {
                Some(token) => (request, Some(token)),
                None if is_form(&request) => {
                    match extract_form_token(request, &config.form_field_name, form_limit).await
                    {
                        Some(pair) => pair,
                        None => {
                            tracing::warn!("CSRF validation failed: unreadable form body");
                            return Ok(csrf_error_response());
                        }
                    }
                }
                None => (request, None),
            };

            let Some(provided_token) = provided_token else {
                tracing::warn!("CSRF validation failed: no token provided");
                return Ok(csrf_error_response());
            };

            if !constant_time_compare(&expected_token, &provided_token) {
                tracing::warn!("CSRF validation failed: token mismatch");
                return Ok(csrf_error_response());
            }

            inner.call(request).await
        })
    }
}

fn is_form(request: &Request<Body>) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

/// Buffer the body, look up the token field, and rebuild the request.
///
/// Returns `None` when the body cannot be read within `limit`.
async fn extract_form_token(
    request: Request<Body>,
    field: &str,
    limit: usize,
) -> Option<(Request<Body>, Option<String>)> {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, limit).await.ok()?;

    let token = serde_urlencoded::from_bytes::<Vec<(String, String)>>(&bytes)
        .ok()
        .and_then(|pairs| {
            pairs
                .into_iter()
                .find(|(name, _)| name == field)
                .map(|(_, value)| value)
        });

    Some((Request::from_parts(parts, Body::from(bytes)), token))
}

fn csrf_error_response() -> Response {
    (
        StatusCode::FORBIDDEN,
        Html(
            "<!DOCTYPE html><html><head><title>Access denied</title></head>\
             <body><h1>Access denied</h1>\
             <p>The form has expired or did not come from this site. Reload the page and try again.</p>\
             </body></html>",
        ),
    )
        .into_response()
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
