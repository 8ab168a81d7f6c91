// src/domain/authorization/mod.rs
pub mod client;
pub mod pkce;
pub mod request;

pub use client::{ClientMetadata, ClientValidationError, validate_client_metadata};
pub use pkce::{CodeChallengeMethod, PkceError, verify_code_challenge};
pub use request::{AuthorizationRequest, EMAIL_SCOPE, IssuedCode, PROFILE_SCOPE, encode_state};
