// src/domain/profile/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::profile::{
    entity::{NewProfile, Profile, ProfileInformation},
    value_objects::{ProfileId, TokenVersion},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Durable store of the single profile record.
///
/// `increment_token_version` must be atomic per profile: two concurrent
/// calls always advance the version twice.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn exists(&self, id: &ProfileId) -> DomainResult<bool>;

    /// True once any profile has been created.
    async fn is_initialised(&self) -> DomainResult<bool>;

    async fn insert(&self, new_profile: NewProfile) -> DomainResult<Profile>;

    /// Insert the first profile of the store. Yields `None` without writing
    /// when any profile already exists; the emptiness check and the write
    /// are a single atomic step.
    async fn insert_initial(&self, new_profile: NewProfile) -> DomainResult<Option<Profile>>;

    async fn find_by_id(&self, id: &ProfileId) -> DomainResult<Option<Profile>>;

    async fn update_information(
        &self,
        id: &ProfileId,
        information: ProfileInformation,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Profile>;

    async fn token_version(&self, id: &ProfileId) -> DomainResult<TokenVersion>;

    async fn increment_token_version(&self, id: &ProfileId) -> DomainResult<TokenVersion>;
}
