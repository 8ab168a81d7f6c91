// src/application/ports/util.rs
use crate::application::ApplicationResult;

/// Source of unguessable one-time values.
pub trait CodeGenerator: Send + Sync {
    /// 256 random bits, hex encoded.
    fn authorization_code(&self) -> ApplicationResult<String>;
    /// 256 random bits, URL-safe base64 encoded.
    fn bearer_token(&self) -> ApplicationResult<String>;
}
