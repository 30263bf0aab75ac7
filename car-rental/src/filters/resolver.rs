//! Per-request resolution of filter and sort values.
//!
//! For each parameter the effective value is, in order of precedence:
//! 1. the query-string value, whenever the parameter is present (an empty
//!    string or zero still counts; an unparseable value yields the default),
//! 2. the value stored in the named cookie, if present and parseable,
//! 3. the default.
//!
//! Every resolved value is recorded in a [`FilterState`] so the transport
//! layer can write it back to its cookie.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, Uri},
};
use tower_sessions::cookie::Cookie;

use super::state::FilterState;
use crate::query::SortState;

/// Query parameter carrying the page number. Never persisted.
pub const PAGE_PARAM: &str = "page";

/// A value that can be read from the query string and round-tripped
/// through a cookie.
pub trait CookieValue: Sized {
    /// Parse a (URL-decoded) query-string value.
    fn from_query(raw: &str) -> Option<Self>;

    /// Parse a raw cookie value.
    fn from_cookie(raw: &str) -> Option<Self>;

    /// Encode for storage in a cookie.
    fn to_cookie(&self) -> String;
}

impl CookieValue for f64 {
    fn from_query(raw: &str) -> Option<Self> {
        raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn from_cookie(raw: &str) -> Option<Self> {
        Self::from_query(raw)
    }

    fn to_cookie(&self) -> String {
        self.to_string()
    }
}

impl CookieValue for String {
    fn from_query(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn from_cookie(raw: &str) -> Option<Self> {
        urlencoding::decode(raw).ok().map(|s| s.into_owned())
    }

    fn to_cookie(&self) -> String {
        urlencoding::encode(self).into_owned()
    }
}

impl CookieValue for SortState {
    fn from_query(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn from_cookie(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn to_cookie(&self) -> String {
        self.name().to_string()
    }
}

/// Resolves filter parameters for one request.
///
/// Extracted from the request head; never shared between requests.
#[derive(Debug, Clone)]
pub struct FilterResolver {
    query: Vec<(String, String)>,
    cookies: HashMap<String, String>,
    state: FilterState,
}

impl FilterResolver {
    /// Build a resolver from already-split query pairs and request headers.
    #[must_use]
    pub fn new(query: Vec<(String, String)>, headers: &HeaderMap, secure: bool) -> Self {
        Self {
            query,
            cookies: parse_cookies(headers),
            state: FilterState::new(secure),
        }
    }

    /// Build a resolver from a request URI and headers.
    #[must_use]
    pub fn from_request(uri: &Uri, headers: &HeaderMap) -> Self {
        let query = uri
            .query()
            .and_then(|q| serde_urlencoded::from_str::<Vec<(String, String)>>(q).ok())
            .unwrap_or_default();

        Self::new(query, headers, is_secure(uri, headers))
    }

    /// Query-string value of `param`; the name matches case-insensitively.
    #[must_use]
    pub fn query_value(&self, param: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(param))
            .map(|(_, value)| value.as_str())
    }

    /// Raw cookie value, if the request carried the cookie.
    #[must_use]
    pub fn cookie_value(&self, cookie: &str) -> Option<&str> {
        self.cookies.get(cookie).map(String::as_str)
    }

    /// Resolve the effective value of `param` and record it for `cookie`.
    pub fn resolve<T: CookieValue>(&mut self, param: &str, cookie: &str, default: T) -> T {
        let value = match self.query_value(param) {
            Some(raw) => T::from_query(raw),
            None => self.cookie_value(cookie).and_then(T::from_cookie),
        }
        .unwrap_or(default);

        self.state.record(cookie, value.to_cookie());
        value
    }

    /// Requested page number; 1 when absent or unparseable.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.query_value(PAGE_PARAM)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(1)
    }

    /// Resolved values to persist.
    #[must_use]
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> FilterState {
        self.state
    }
}

impl<S> FromRequestParts<S> for FilterResolver
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_request(&parts.uri, &parts.headers))
    }
}

fn parse_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| {
            Cookie::split_parse(value.to_string())
                .filter_map(Result::ok)
                .map(|c| (c.name().to_string(), c.value().to_string()))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Whether the request reached us over HTTPS, directly or via a proxy.
fn is_secure(uri: &Uri, headers: &HeaderMap) -> bool {
    uri.scheme_str() == Some("https")
        || headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|proto| proto.eq_ignore_ascii_case("https"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    fn resolver(uri: &str, cookie: &str) -> FilterResolver {
        let uri: Uri = uri.parse().unwrap();
        FilterResolver::from_request(&uri, &headers_with_cookie(cookie))
    }

    #[test]
    fn test_query_overrides_cookie() {
        let mut r = resolver("/Cars?RentalCostPerDay=80", "CarRentalCostPerDay=50");
        assert_eq!(r.resolve("RentalCostPerDay", "CarRentalCostPerDay", 0.0), 80.0);
        assert_eq!(r.state().get("CarRentalCostPerDay"), Some("80"));
    }

    #[test]
    fn test_explicit_zero_and_empty_count_as_supplied() {
        let mut r = resolver(
            "/Clients?PhoneNumber=&x=1",
            "ClientPhoneNumber=555",
        );
        assert_eq!(
            r.resolve("PhoneNumber", "ClientPhoneNumber", String::new()),
            ""
        );

        let mut r = resolver("/Cars?RentalCostPerDay=0", "CarRentalCostPerDay=50");
        assert_eq!(r.resolve("RentalCostPerDay", "CarRentalCostPerDay", 0.0), 0.0);
        assert_eq!(r.state().get("CarRentalCostPerDay"), Some("0"));
    }

    #[test]
    fn test_cookie_used_when_param_absent() {
        let mut r = resolver("/Maintenances", "MaintenanceCost=100; other=1");
        assert_eq!(r.resolve("Cost", "MaintenanceCost", 0.0), 100.0);
    }

    #[test]
    fn test_default_when_cookie_missing_or_unparseable() {
        let mut r = resolver("/Maintenances", "MaintenanceCost=abc");
        assert_eq!(r.resolve("Cost", "MaintenanceCost", 0.0), 0.0);

        let mut r = resolver("/Maintenances", "unrelated=1");
        assert_eq!(
            r.resolve("sortOrder", "MaintenanceSortOrder", SortState::CostAsc),
            SortState::CostAsc
        );
        assert_eq!(r.state().get("MaintenanceSortOrder"), Some("CostAsc"));
    }

    #[test]
    fn test_unparseable_query_value_yields_default_not_cookie() {
        let mut r = resolver("/Cars?RentalCostPerDay=cheap", "CarRentalCostPerDay=50");
        assert_eq!(r.resolve("RentalCostPerDay", "CarRentalCostPerDay", 0.0), 0.0);
    }

    #[test]
    fn test_param_presence_is_case_insensitive() {
        let mut r = resolver("/Cars?SORTORDER=rentalcostperdaydesc", "");
        assert_eq!(
            r.resolve("sortOrder", "CarSortOrder", SortState::RentalCostPerDayAsc),
            SortState::RentalCostPerDayDesc
        );
    }

    #[test]
    fn test_parameters_resolve_independently() {
        let mut r = resolver(
            "/Cars?sortOrder=RentalCostPerDayDesc",
            "CarRentalCostPerDay=75; CarSortOrder=RentalCostPerDayAsc",
        );
        assert_eq!(
            r.resolve("sortOrder", "CarSortOrder", SortState::RentalCostPerDayAsc),
            SortState::RentalCostPerDayDesc
        );
        assert_eq!(r.resolve("RentalCostPerDay", "CarRentalCostPerDay", 0.0), 75.0);
    }

    #[test]
    fn test_text_values_round_trip_through_cookie_encoding() {
        let mut first = resolver("/CarClasses?SearchName=Full%20size%3B%20SUV", "");
        let value = first.resolve("SearchName", "CarClassSearchName", String::new());
        assert_eq!(value, "Full size; SUV");

        let stored = first.state().get("CarClassSearchName").unwrap().to_string();
        assert!(!stored.contains(';'));

        let mut second = resolver("/CarClasses", &format!("CarClassSearchName={stored}"));
        assert_eq!(
            second.resolve("SearchName", "CarClassSearchName", String::new()),
            "Full size; SUV"
        );
    }

    #[test]
    fn test_page_parameter() {
        assert_eq!(resolver("/Cars", "").page(), 1);
        assert_eq!(resolver("/Cars?page=3", "").page(), 3);
        assert_eq!(resolver("/Cars?Page=-2", "").page(), -2);
        assert_eq!(resolver("/Cars?page=two", "").page(), 1);
        assert!(resolver("/Cars?page=3", "").state().is_empty());
    }

    #[test]
    fn test_secure_detection() {
        let uri: Uri = "/Cars".parse().unwrap();
        assert!(!is_secure(&uri, &HeaderMap::new()));

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert!(is_secure(&uri, &headers));

        let absolute: Uri = "https://rental.example/Cars".parse().unwrap();
        assert!(is_secure(&absolute, &HeaderMap::new()));
    }
}
