// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{
            authorization::{AuthorizationCommandService, AuthorizationEndpoints},
            profile::ProfileCommandService,
        },
        dto::AuthenticatedProfile,
        error::{ApplicationError, ApplicationResult},
        ports::{
            ClientDiscoveryPort, ClockPort, CodeGeneratorPort, ExpiringStorePort,
            PasswordHasherPort, SessionTokenManagerPort,
        },
        queries::profile::ProfileQueryService,
    },
    domain::{errors::DomainError, profile::ProfileRepository},
};
use tracing::warn;

pub struct ApplicationServices {
    pub authorization_commands: Arc<AuthorizationCommandService>,
    pub profile_commands: Arc<ProfileCommandService>,
    pub profile_queries: Arc<ProfileQueryService>,
    profile_repo: Arc<dyn ProfileRepository>,
    session_tokens: Arc<SessionTokenManagerPort>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        profile_repo: Arc<dyn ProfileRepository>,
        cache: Arc<ExpiringStorePort>,
        discovery: Arc<ClientDiscoveryPort>,
        password_hasher: Arc<PasswordHasherPort>,
        session_tokens: Arc<SessionTokenManagerPort>,
        code_generator: Arc<CodeGeneratorPort>,
        clock: Arc<ClockPort>,
        endpoints: AuthorizationEndpoints,
    ) -> Self {
        let authorization_commands = Arc::new(AuthorizationCommandService::new(
            cache,
            discovery,
            Arc::clone(&profile_repo),
            code_generator,
            Arc::clone(&clock),
            endpoints,
        ));

        let profile_commands = Arc::new(ProfileCommandService::new(
            Arc::clone(&profile_repo),
            password_hasher,
            Arc::clone(&session_tokens),
            clock,
        ));

        let profile_queries = Arc::new(ProfileQueryService::new(Arc::clone(&profile_repo)));

        Self {
            authorization_commands,
            profile_commands,
            profile_queries,
            profile_repo,
            session_tokens,
        }
    }

    /// Verify a session token and make sure it was issued at the profile's
    /// current token version.
    pub async fn authenticate_session(&self, token: &str) -> ApplicationResult<AuthenticatedProfile> {
        let claims = self.session_tokens.validate(token).await?;

        let current = match self.profile_repo.token_version(&claims.profile_id).await {
            Ok(version) => version,
            Err(DomainError::NotFound(_)) => {
                return Err(ApplicationError::unauthorized("unknown profile"));
            }
            Err(err) => return Err(err.into()),
        };

        if current != claims.token_version {
            warn!(
                profile_id = %claims.profile_id,
                token_version = %claims.token_version,
                current_version = %current,
                "rejected revoked session token"
            );
            return Err(ApplicationError::unauthorized("session revoked"));
        }

        Ok(AuthenticatedProfile {
            profile_id: claims.profile_id,
            token_version: claims.token_version,
        })
    }
}
