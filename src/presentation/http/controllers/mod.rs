// src/presentation/http/controllers/mod.rs
pub mod authorization;
pub mod metadata;
pub mod profile;
pub mod setup;

use axum::http::{HeaderName, HeaderValue, header};

/// Keeps tokens and consent details out of shared caches.
pub(crate) fn no_store() -> [(HeaderName, HeaderValue); 1] {
    [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))]
}
