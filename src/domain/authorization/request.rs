// src/domain/authorization/request.rs
use base64::{Engine as _, engine::general_purpose::URL_SAFE};
use serde::{Deserialize, Serialize};

pub const PROFILE_SCOPE: &str = "profile";
pub const EMAIL_SCOPE: &str = "email";

/// Cache key for a pending transaction: the client's state, URL-safe encoded.
pub fn encode_state(state: &str) -> String {
    URL_SAFE.encode(state.as_bytes())
}

/// One pending authorization attempt. Stored whole and never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub redirect_uri: String,
    pub code_challenge: String,
    pub code_challenge_method: String,
    pub scopes: Vec<String>,
    pub state: String,
    pub me: Option<String>,
}

impl AuthorizationRequest {
    pub fn encoded_state(&self) -> String {
        encode_state(&self.state)
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

/// What the owner granted, bound to the client that asked for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCode {
    pub client_id: String,
    pub redirect_uri: String,
    pub code_challenge: String,
    pub code_challenge_method: String,
    pub scopes: Vec<String>,
    pub profile_id: String,
}

impl IssuedCode {
    pub fn for_request(request: &AuthorizationRequest, profile_id: impl Into<String>) -> Self {
        Self {
            client_id: request.client_id.clone(),
            redirect_uri: request.redirect_uri.clone(),
            code_challenge: request.code_challenge.clone(),
            code_challenge_method: request.code_challenge_method.clone(),
            scopes: request.scopes.clone(),
            profile_id: profile_id.into(),
        }
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    pub fn scope(&self) -> String {
        self.scopes.join(" ")
    }
}
