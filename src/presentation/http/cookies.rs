// src/presentation/http/cookies.rs
use crate::presentation::http::state::HttpSettings;
use axum::http::{HeaderValue, header::InvalidHeaderValue};

/// `Set-Cookie` value carrying a freshly issued session token.
pub fn session_cookie(
    settings: &HttpSettings,
    token: &str,
    max_age_secs: i64,
) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={token}; Path=/; Domain={}; Max-Age={}; HttpOnly; Secure; SameSite=Strict",
        settings.cookie_name,
        settings.domain,
        max_age_secs.max(0)
    ))
}

/// `Set-Cookie` value that removes the session cookie.
pub fn cleared_session_cookie(settings: &HttpSettings) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{}=; Path=/; Domain={}; Max-Age=0; HttpOnly; Secure; SameSite=Strict",
        settings.cookie_name, settings.domain
    ))
}
