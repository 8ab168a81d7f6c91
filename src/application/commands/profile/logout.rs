// src/application/commands/profile/logout.rs
use super::ProfileCommandService;
use crate::{
    application::error::ApplicationResult,
    domain::profile::{ProfileId, TokenVersion},
};
use tracing::info;

impl ProfileCommandService {
    /// Revoke every session issued for the profile by advancing its token version.
    pub async fn logout(&self, profile_id: &ProfileId) -> ApplicationResult<TokenVersion> {
        let version = self.profile_repo.increment_token_version(profile_id).await?;
        info!(profile_id = %profile_id, token_version = %version, "sessions revoked");
        Ok(version)
    }
}
