// src/application/ports/security.rs
use crate::{
    application::{ApplicationResult, dto::SessionTokenDto},
    domain::profile::{ProfileId, TokenVersion},
};
use async_trait::async_trait;
use thiserror::Error;

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> ApplicationResult<String>;
    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionTokenError {
    #[error("the session token signature is invalid")]
    InvalidSignature,
    #[error("the session token has expired")]
    Expired,
    #[error("the session token is malformed")]
    Malformed,
    #[error("unable to sign the session token: {0}")]
    Signing(String),
}

/// Identity recovered from a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub profile_id: ProfileId,
    pub token_version: TokenVersion,
}

#[async_trait]
pub trait SessionTokenManager: Send + Sync {
    async fn issue(
        &self,
        profile_id: &ProfileId,
        token_version: TokenVersion,
    ) -> Result<SessionTokenDto, SessionTokenError>;

    /// Checks signature, structure and expiry only. The caller compares the
    /// returned version with the stored one.
    async fn validate(&self, token: &str) -> Result<SessionClaims, SessionTokenError>;
}
