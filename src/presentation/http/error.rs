// src/presentation/http/error.rs
use crate::{
    application::{
        ApplicationResult, commands::authorization::AuthorizationError, error::ApplicationError,
        ports::client_discovery::DiscoveryError,
    },
    domain::errors::DomainError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        let status = status_for(&err);
        let message = match err {
            ApplicationError::Validation(msg)
            | ApplicationError::NotFound(msg)
            | ApplicationError::Conflict(msg)
            | ApplicationError::Unauthorized(msg)
            | ApplicationError::Forbidden(msg)
            | ApplicationError::Infrastructure(msg) => msg,
            other => other.to_string(),
        };
        Self::new(status, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn new(status: StatusCode, message: String) -> Self {
        Self { status, message }
    }
}

fn status_for(err: &ApplicationError) -> StatusCode {
    match err {
        ApplicationError::Validation(_) | ApplicationError::Url(_) => StatusCode::BAD_REQUEST,
        ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
        ApplicationError::Conflict(_) => StatusCode::CONFLICT,
        ApplicationError::Unauthorized(_)
        | ApplicationError::Session(_)
        | ApplicationError::Pkce(_)
        | ApplicationError::ClientValidation(_) => StatusCode::UNAUTHORIZED,
        ApplicationError::Forbidden(_) => StatusCode::FORBIDDEN,
        ApplicationError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ApplicationError::Discovery(DiscoveryError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
        ApplicationError::Discovery(_) => StatusCode::BAD_GATEWAY,
        ApplicationError::Domain(domain) => match domain {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::NotFound(_) | DomainError::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        },
        ApplicationError::Authorization(auth) => match auth {
            AuthorizationError::MissingParameter(_)
            | AuthorizationError::UnsupportedResponseType(_) => StatusCode::BAD_REQUEST,
            AuthorizationError::StateInUse => StatusCode::CONFLICT,
            AuthorizationError::MissingGrantType | AuthorizationError::UnsupportedGrantType(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AuthorizationError::UnknownTransaction
            | AuthorizationError::MismatchedProfile { .. }
            | AuthorizationError::MissingAuthorizationCode
            | AuthorizationError::ExpiredAuthorizationCode
            | AuthorizationError::MismatchedClientId
            | AuthorizationError::MismatchedRedirectUri => StatusCode::UNAUTHORIZED,
        },
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status.as_u16(), error = %self.message, "request failed");
        } else {
            warn!(status = %self.status.as_u16(), error = %self.message, "request rejected");
        }

        let payload = ErrorBody {
            error: self
                .status
                .canonical_reason()
                .unwrap_or("error")
                .to_string(),
            message: self.message,
        };
        (self.status, Json(payload)).into_response()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}
