// src/application/commands/authorization/error.rs
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    #[error("the '{0}' query parameter is missing")]
    MissingParameter(&'static str),

    #[error("unsupported response type '{0}'")]
    UnsupportedResponseType(String),

    #[error("the state is already bound to a different authorization request")]
    StateInUse,

    #[error("no pending authorization request matches the given state")]
    UnknownTransaction,

    #[error(
        "the authenticated profile ({authenticated}) does not match the profile in the authorization request ({requested})"
    )]
    MismatchedProfile {
        authenticated: String,
        requested: String,
    },

    #[error("missing grant type")]
    MissingGrantType,

    #[error("unsupported grant type '{0}'")]
    UnsupportedGrantType(String),

    #[error("missing authorization code")]
    MissingAuthorizationCode,

    #[error("expired authorization code")]
    ExpiredAuthorizationCode,

    #[error("the client ID does not match the one bound to the authorization code")]
    MismatchedClientId,

    #[error("the redirect URI does not match the one bound to the authorization code")]
    MismatchedRedirectUri,
}
