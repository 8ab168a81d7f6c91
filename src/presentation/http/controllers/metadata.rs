// src/presentation/http/controllers/metadata.rs
use crate::{
    domain::authorization::{EMAIL_SCOPE, PROFILE_SCOPE},
    presentation::http::{
        routes::{AUTHORIZATION_PATH, TOKEN_PATH},
        state::HttpState,
    },
};
use axum::{Extension, Json};
use serde::Serialize;

const SERVICE_DOCUMENTATION: &str = "https://indieauth.spec.indieweb.org";

/// OAuth 2.0 authorization server metadata.
#[derive(Debug, Serialize)]
pub struct ServerMetadata {
    pub issuer: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub service_documentation: &'static str,
    pub code_challenge_methods_supported: [&'static str; 1],
    pub grant_types_supported: [&'static str; 1],
    pub response_types_supported: [&'static str; 1],
    pub scopes_supported: [&'static str; 2],
    pub authorization_response_iss_parameter_supported: bool,
}

pub async fn server_metadata(Extension(state): Extension<HttpState>) -> Json<ServerMetadata> {
    let base = format!("https://{}", state.settings.domain);

    Json(ServerMetadata {
        issuer: state.settings.issuer.clone(),
        authorization_endpoint: format!("{base}{AUTHORIZATION_PATH}"),
        token_endpoint: format!("{base}{TOKEN_PATH}"),
        service_documentation: SERVICE_DOCUMENTATION,
        code_challenge_methods_supported: ["S256"],
        grant_types_supported: ["authorization_code"],
        response_types_supported: ["code"],
        scopes_supported: [PROFILE_SCOPE, EMAIL_SCOPE],
        authorization_response_iss_parameter_supported: true,
    })
}
