// src/presentation/http/middleware/entrypoint.rs
use crate::presentation::http::state::HttpState;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

pub const SETUP_PATH: &str = "/setup";

/// Send every request to the setup page until the owner's profile exists.
pub async fn require_setup(request: Request, next: Next) -> Response {
    let initialised = request
        .extensions()
        .get::<HttpState>()
        .is_some_and(HttpState::is_initialised);

    if initialised || is_exempt(request.uri().path()) {
        return next.run(request).await;
    }

    Redirect::to(SETUP_PATH).into_response()
}

fn is_exempt(path: &str) -> bool {
    path == SETUP_PATH || path == "/health"
}
