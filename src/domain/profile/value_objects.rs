// src/domain/profile/value_objects.rs
use crate::domain::{
    errors::{DomainError, DomainResult},
    url::{UrlError, validate_and_canonicalize_url},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical profile URL. Profile identifiers never carry a port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        validate_and_canonicalize_url(input, false).map(Self)
    }

    /// Wrap a value that was canonicalised before it was stored.
    pub fn from_canonical(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ProfileId> for String {
    fn from(value: ProfileId) -> Self {
        value.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Revocation counter embedded in every session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenVersion(i64);

impl TokenVersion {
    pub const INITIAL: Self = Self(0);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// The version after a logout; wraps to zero at `i64::MAX`.
    #[must_use]
    pub fn next(self) -> Self {
        if self.0 >= i64::MAX {
            Self(0)
        } else {
            Self(self.0 + 1)
        }
    }
}

impl From<TokenVersion> for i64 {
    fn from(value: TokenVersion) -> Self {
        value.0
    }
}

impl fmt::Display for TokenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation(
                "password hash cannot be empty".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PasswordHash> for String {
    fn from(value: PasswordHash) -> Self {
        value.0
    }
}
