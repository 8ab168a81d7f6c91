// src/application/commands/authorization/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::{
            cache::ExpiringStore, client_discovery::ClientDiscovery, time::Clock,
            util::CodeGenerator,
        },
    },
    domain::{
        authorization::{AuthorizationRequest, ClientMetadata, validate_client_metadata},
        profile::ProfileRepository,
    },
};
use bytes::Bytes;
use chrono::Duration;
use serde::{Serialize, de::DeserializeOwned};

/// Lifetime of a pending authorization request, in seconds.
pub const PENDING_REQUEST_TTL: i64 = 600;
/// Lifetime of an issued authorization code, in seconds.
pub const ISSUED_CODE_TTL: i64 = 60;

const PENDING_REQUEST_PREFIX: &str = "authorization_request:";
const ISSUED_CODE_PREFIX: &str = "authorization_code:";

/// Public locations the authorization flow refers clients and owners to.
#[derive(Debug, Clone)]
pub struct AuthorizationEndpoints {
    pub issuer: String,
    pub authorization_path: String,
}

pub struct AuthorizationCommandService {
    pub(super) cache: Arc<dyn ExpiringStore>,
    pub(super) discovery: Arc<dyn ClientDiscovery>,
    pub(super) profile_repo: Arc<dyn ProfileRepository>,
    pub(super) code_generator: Arc<dyn CodeGenerator>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) endpoints: AuthorizationEndpoints,
}

impl AuthorizationCommandService {
    pub fn new(
        cache: Arc<dyn ExpiringStore>,
        discovery: Arc<dyn ClientDiscovery>,
        profile_repo: Arc<dyn ProfileRepository>,
        code_generator: Arc<dyn CodeGenerator>,
        clock: Arc<dyn Clock>,
        endpoints: AuthorizationEndpoints,
    ) -> Self {
        Self {
            cache,
            discovery,
            profile_repo,
            code_generator,
            clock,
            endpoints,
        }
    }

    pub(super) fn pending_key(encoded_state: &str) -> String {
        format!("{PENDING_REQUEST_PREFIX}{encoded_state}")
    }

    pub(super) fn code_key(code: &str) -> String {
        format!("{ISSUED_CODE_PREFIX}{code}")
    }

    /// Unexpired pending request stored under `encoded_state`, if any.
    pub(super) fn load_pending(
        &self,
        encoded_state: &str,
    ) -> ApplicationResult<Option<AuthorizationRequest>> {
        let Some(entry) = self.cache.get(&Self::pending_key(encoded_state)) else {
            return Ok(None);
        };

        if entry.expired_at(self.clock.now()) {
            return Ok(None);
        }

        decode(entry.value()).map(Some)
    }

    pub(super) fn store_pending(
        &self,
        request: &AuthorizationRequest,
        encoded_state: &str,
    ) -> ApplicationResult<()> {
        self.cache.add(
            &Self::pending_key(encoded_state),
            encode(request)?,
            self.clock.now() + Duration::seconds(PENDING_REQUEST_TTL),
        );
        Ok(())
    }

    pub(super) fn delete_pending(&self, encoded_state: &str) {
        self.cache.delete(&Self::pending_key(encoded_state));
    }

    /// Fetch the client's published metadata and check the request against it.
    pub(super) async fn validated_client(
        &self,
        request: &AuthorizationRequest,
    ) -> ApplicationResult<ClientMetadata> {
        let metadata = self.discovery.fetch(&request.client_id).await?;
        validate_client_metadata(&metadata, &request.client_id, &request.redirect_uri)?;
        Ok(metadata)
    }
}

pub(super) fn encode<T: Serialize>(value: &T) -> ApplicationResult<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(|err| ApplicationError::infrastructure(format!("unable to encode cache entry: {err}")))
}

pub(super) fn decode<T: DeserializeOwned>(bytes: &Bytes) -> ApplicationResult<T> {
    serde_json::from_slice(bytes)
        .map_err(|err| ApplicationError::infrastructure(format!("unable to decode cache entry: {err}")))
}
