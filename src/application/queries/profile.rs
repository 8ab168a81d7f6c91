// src/application/queries/profile.rs
use crate::{
    application::{
        dto::ProfileDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::profile::{ProfileId, ProfileRepository},
};
use std::sync::Arc;

pub struct ProfileQueryService {
    profile_repo: Arc<dyn ProfileRepository>,
}

impl ProfileQueryService {
    pub fn new(profile_repo: Arc<dyn ProfileRepository>) -> Self {
        Self { profile_repo }
    }

    pub async fn is_initialised(&self) -> ApplicationResult<bool> {
        Ok(self.profile_repo.is_initialised().await?)
    }

    pub async fn get_profile(&self, profile_id: &ProfileId) -> ApplicationResult<ProfileDto> {
        self.profile_repo
            .find_by_id(profile_id)
            .await?
            .map(ProfileDto::from)
            .ok_or_else(|| ApplicationError::not_found(format!("profile {profile_id} not found")))
    }
}
