//! Resolved filter values and their cookie persistence.

use std::convert::Infallible;

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponseParts, ResponseParts},
};
use time::{Duration, OffsetDateTime};
use tower_sessions::cookie::{Cookie, SameSite};

/// How long a remembered filter survives without being refreshed.
pub const FILTER_COOKIE_LIFETIME: Duration = Duration::days(30);

/// The filter and sort values in effect for one request.
///
/// Returned alongside the rendered page; as a response part it writes one
/// `Set-Cookie` header per value (30-day expiry, http-only, secure when the
/// request came over HTTPS).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    secure: bool,
    values: Vec<(String, String)>,
}

impl FilterState {
    #[must_use]
    pub fn new(secure: bool) -> Self {
        Self {
            secure,
            values: Vec::new(),
        }
    }

    /// Record the encoded value for `cookie`, replacing an earlier one.
    pub fn record(&mut self, cookie: &str, value: String) {
        match self.values.iter_mut().find(|(name, _)| name == cookie) {
            Some(entry) => entry.1 = value,
            None => self.values.push((cookie.to_string(), value)),
        }
    }

    /// Encoded value recorded for `cookie`.
    #[must_use]
    pub fn get(&self, cookie: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == cookie)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Cookies to send back, expiring 30 days from now.
    #[must_use]
    pub fn cookies(&self) -> Vec<Cookie<'static>> {
        let expires = OffsetDateTime::now_utc() + FILTER_COOKIE_LIFETIME;

        self.values
            .iter()
            .map(|(name, value)| {
                Cookie::build((name.clone(), value.clone()))
                    .path("/")
                    .http_only(true)
                    .secure(self.secure)
                    .same_site(SameSite::Lax)
                    .expires(expires)
                    .build()
            })
            .collect()
    }
}

impl IntoResponseParts for FilterState {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        for cookie in self.cookies() {
            match HeaderValue::from_str(&cookie.to_string()) {
                Ok(value) => {
                    res.headers_mut().append(header::SET_COOKIE, value);
                }
                Err(e) => tracing::warn!(cookie = cookie.name(), "Skipping filter cookie: {}", e),
            }
        }
        Ok(res)
    }
}
