// src/application/dto/authorization.rs
use serde::{Deserialize, Serialize};

/// Query parameters of an authorization request. Presence is checked by
/// the command service so that a missing value can be named.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorizationQuery {
    pub client_id: Option<String>,
    pub code_challenge: Option<String>,
    pub code_challenge_method: Option<String>,
    pub redirect_uri: Option<String>,
    pub response_type: Option<String>,
    pub state: Option<String>,
    pub scope: Option<String>,
    pub me: Option<String>,
}

/// Body of a code exchange at either the authorization or the token endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExchangeForm {
    #[serde(default)]
    pub grant_type: String,
    pub code: Option<String>,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub redirect_uri: String,
    #[serde(default)]
    pub code_verifier: String,
}

/// What the owner is shown before accepting or rejecting a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentDto {
    pub client_id: String,
    pub client_name: String,
    pub client_uri: String,
    pub logo_uri: String,
    pub redirect_uri: String,
    pub profile_id: String,
    pub accept_uri: String,
    pub reject_uri: String,
    pub state: String,
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileClaimsDto {
    pub name: String,
    pub url: String,
    pub photo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileExchangeDto {
    pub me: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileClaimsDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenExchangeDto {
    pub access_token: String,
    pub token_type: String,
    pub scope: String,
    pub me: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileClaimsDto>,
}
