// src/application/dto/profile.rs
use crate::domain::profile::Profile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDto {
    pub profile_id: String,
    pub display_name: String,
    pub url: String,
    pub photo_url: String,
    pub email: String,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileDto {
    fn from(profile: Profile) -> Self {
        Self {
            profile_id: profile.id.into(),
            display_name: profile.information.name,
            url: profile.information.url,
            photo_url: profile.information.photo,
            email: profile.information.email,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}
