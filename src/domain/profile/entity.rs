// src/domain/profile/entity.rs
use crate::domain::profile::value_objects::{PasswordHash, ProfileId, TokenVersion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims the owner publishes to clients granted the `profile` scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInformation {
    pub name: String,
    pub url: String,
    pub photo: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub id: ProfileId,
    pub password_hash: PasswordHash,
    pub token_version: TokenVersion,
    pub information: ProfileInformation,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProfile {
    pub id: ProfileId,
    pub password_hash: PasswordHash,
    pub information: ProfileInformation,
    pub created_at: DateTime<Utc>,
}

impl NewProfile {
    pub fn new(
        id: ProfileId,
        password_hash: PasswordHash,
        information: ProfileInformation,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            password_hash,
            information,
            created_at,
        }
    }

    /// The stored record right after creation.
    pub fn into_profile(self) -> Profile {
        Profile {
            id: self.id,
            password_hash: self.password_hash,
            token_version: TokenVersion::INITIAL,
            information: self.information,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
