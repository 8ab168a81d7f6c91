// src/application/error.rs
use crate::{
    application::{
        commands::authorization::AuthorizationError,
        ports::{client_discovery::DiscoveryError, security::SessionTokenError},
    },
    domain::{
        authorization::{ClientValidationError, PkceError},
        errors::DomainError,
        url::UrlError,
    },
};
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error("error validating the client's authorization request: {0}")]
    ClientValidation(#[from] ClientValidationError),

    #[error("error fetching the client's metadata: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("invalid session: {0}")]
    Session(#[from] SessionTokenError),

    #[error("invalid URL: {0}")]
    Url(#[from] UrlError),

    #[error("code verification failed: {0}")]
    Pkce(#[from] PkceError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }
}
