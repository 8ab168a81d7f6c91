// src/presentation/http/extractors.rs
use crate::{
    application::{dto::AuthenticatedProfile, error::ApplicationError},
    presentation::http::state::HttpState,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use headers::{Cookie, HeaderMapExt};

use super::error::HttpError;

/// The owner's session, required.
#[derive(Debug, Clone)]
pub struct ProfileSession(pub AuthenticatedProfile);

/// The owner's session when a valid one is presented.
#[derive(Debug, Clone)]
pub struct MaybeProfileSession(pub Option<AuthenticatedProfile>);

fn app_state(parts: &Parts) -> Result<HttpState, HttpError> {
    parts.extensions.get::<HttpState>().cloned().ok_or_else(|| {
        HttpError::from_error(ApplicationError::infrastructure(
            "application state missing",
        ))
    })
}

fn session_cookie(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .typed_get::<Cookie>()
        .and_then(|cookie| cookie.get(name).map(str::to_owned))
        .filter(|token| !token.is_empty())
}

impl<S> FromRequestParts<S> for ProfileSession
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = app_state(parts)?;
        let token = session_cookie(parts, &state.settings.cookie_name).ok_or_else(|| {
            HttpError::from_error(ApplicationError::unauthorized("missing session cookie"))
        })?;

        let profile = state
            .services
            .authenticate_session(&token)
            .await
            .map_err(HttpError::from_error)?;

        Ok(Self(profile))
    }
}

impl<S> FromRequestParts<S> for MaybeProfileSession
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = app_state(parts)?;
        let Some(token) = session_cookie(parts, &state.settings.cookie_name) else {
            return Ok(Self(None));
        };

        // A stale or revoked cookie is treated as no session at all.
        Ok(Self(state.services.authenticate_session(&token).await.ok()))
    }
}
