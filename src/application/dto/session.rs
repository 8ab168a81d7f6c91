// src/application/dto/session.rs
use crate::domain::profile::{ProfileId, TokenVersion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTokenDto {
    pub token: String,
    #[serde(with = "serde_time")]
    pub issued_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

/// A profile owner whose session token verified and has not been revoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedProfile {
    pub profile_id: ProfileId,
    pub token_version: TokenVersion,
}
