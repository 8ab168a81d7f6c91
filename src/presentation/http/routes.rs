// src/presentation/http/routes.rs
use crate::presentation::http::{
    controllers::{authorization, metadata, profile, setup},
    middleware::{entrypoint, rate_limit::credential_rate_limit},
    state::HttpState,
};
use axum::{
    Extension, Json, Router,
    extract::Request,
    http::Method,
    middleware,
    routing::{get, post},
};
use serde::Serialize;
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info_span;

pub const AUTHORIZATION_PATH: &str = "/indieauth/authorize";
pub const TOKEN_PATH: &str = "/indieauth/token";
pub const LOGIN_PATH: &str = "/profile/login";
pub const OVERVIEW_PATH: &str = "/profile/overview";

pub fn build_router(state: HttpState) -> Router {
    build_router_with_rate_limiter(state, true)
}

/// Build the router, optionally without the per-IP limiter on the credential
/// routes (it needs the peer address, which in-process tests do not provide).
pub fn build_router_with_rate_limiter(state: HttpState, rate_limited: bool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600));

    let mut login = post(profile::login);
    let mut profile_exchange = post(authorization::exchange_profile);
    let mut token_exchange = post(authorization::exchange_token);
    if rate_limited {
        let limit = credential_rate_limit(10, 20);
        login = login.layer(limit.clone());
        profile_exchange = profile_exchange.layer(limit.clone());
        token_exchange = token_exchange.layer(limit);
    }

    Router::new()
        .route("/", get(profile::root))
        .route("/health", get(health))
        .route(
            "/.well-known/oauth-authorization-server",
            get(metadata::server_metadata),
        )
        .route(
            entrypoint::SETUP_PATH,
            get(setup::setup_status).post(setup::setup),
        )
        .route(LOGIN_PATH, get(profile::login_page).merge(login))
        .route("/profile/logout", post(profile::logout))
        .route(
            OVERVIEW_PATH,
            get(profile::overview).post(profile::update_overview),
        )
        .route(
            AUTHORIZATION_PATH,
            get(authorization::authorize).merge(profile_exchange),
        )
        .route(TOKEN_PATH, token_exchange)
        .route(
            &format!("{AUTHORIZATION_PATH}/accept"),
            post(authorization::accept),
        )
        .route(
            &format!("{AUTHORIZATION_PATH}/reject"),
            post(authorization::reject),
        )
        .layer(middleware::from_fn(entrypoint::require_setup))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();
            info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        }))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}
