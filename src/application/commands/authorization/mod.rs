// src/application/commands/authorization/mod.rs
mod decision;
mod error;
mod exchange;
mod resolve;
mod service;

pub use error::AuthorizationError;
pub use resolve::PendingAuthorization;
pub use service::{
    AuthorizationCommandService, AuthorizationEndpoints, ISSUED_CODE_TTL, PENDING_REQUEST_TTL,
};
