// src/infrastructure/repositories/memory_profile.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::profile::{
    NewProfile, Profile, ProfileId, ProfileInformation, ProfileRepository, TokenVersion,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Profile store kept in process memory.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<ProfileId, Profile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ProfileId, Profile>> {
        self.profiles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(id: &ProfileId) -> DomainError {
    DomainError::NotFound(format!("profile {id} not found"))
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn exists(&self, id: &ProfileId) -> DomainResult<bool> {
        Ok(self.lock().contains_key(id))
    }

    async fn is_initialised(&self) -> DomainResult<bool> {
        Ok(!self.lock().is_empty())
    }

    async fn insert(&self, new_profile: NewProfile) -> DomainResult<Profile> {
        let mut profiles = self.lock();
        if profiles.contains_key(&new_profile.id) {
            return Err(DomainError::Conflict("profile already exists".into()));
        }
        let profile = new_profile.into_profile();
        profiles.insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }

    async fn insert_initial(&self, new_profile: NewProfile) -> DomainResult<Option<Profile>> {
        let mut profiles = self.lock();
        if !profiles.is_empty() {
            return Ok(None);
        }
        let profile = new_profile.into_profile();
        profiles.insert(profile.id.clone(), profile.clone());
        Ok(Some(profile))
    }

    async fn find_by_id(&self, id: &ProfileId) -> DomainResult<Option<Profile>> {
        Ok(self.lock().get(id).cloned())
    }

    async fn update_information(
        &self,
        id: &ProfileId,
        information: ProfileInformation,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Profile> {
        let mut profiles = self.lock();
        let profile = profiles.get_mut(id).ok_or_else(|| not_found(id))?;
        profile.information = information;
        profile.updated_at = updated_at;
        Ok(profile.clone())
    }

    async fn token_version(&self, id: &ProfileId) -> DomainResult<TokenVersion> {
        self.lock()
            .get(id)
            .map(|profile| profile.token_version)
            .ok_or_else(|| not_found(id))
    }

    async fn increment_token_version(&self, id: &ProfileId) -> DomainResult<TokenVersion> {
        let mut profiles = self.lock();
        let profile = profiles.get_mut(id).ok_or_else(|| not_found(id))?;
        profile.token_version = profile.token_version.next();
        Ok(profile.token_version)
    }
}
