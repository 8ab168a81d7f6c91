// src/application/commands/authorization/decision.rs
use super::{
    AuthorizationCommandService, AuthorizationError, ISSUED_CODE_TTL,
    resolve::ensure_profile_matches, service::encode,
};
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::{
        authorization::{AuthorizationRequest, IssuedCode},
        profile::ProfileId,
    },
};
use chrono::Duration;
use tracing::info;
use url::Url;

impl AuthorizationCommandService {
    /// Grant the pending request. Returns the client redirect carrying the
    /// new authorization code.
    pub async fn accept(
        &self,
        encoded_state: &str,
        profile_id: &ProfileId,
    ) -> ApplicationResult<String> {
        let request = self.pending_for_decision(encoded_state, profile_id).await?;
        let mut redirect = parse_redirect(&request)?;

        let code = self.code_generator.authorization_code()?;
        let issued = IssuedCode::for_request(&request, profile_id.as_str());
        self.cache.add(
            &Self::code_key(&code),
            encode(&issued)?,
            self.clock.now() + Duration::seconds(ISSUED_CODE_TTL),
        );
        self.delete_pending(encoded_state);

        redirect
            .query_pairs_mut()
            .append_pair("code", &code)
            .append_pair("state", &request.state)
            .append_pair("iss", &self.endpoints.issuer);

        info!(client_id = %request.client_id, profile_id = %profile_id, "authorization request accepted");
        Ok(redirect.into())
    }

    /// Deny the pending request. No code is issued.
    pub async fn reject(
        &self,
        encoded_state: &str,
        profile_id: &ProfileId,
    ) -> ApplicationResult<String> {
        let request = self.pending_for_decision(encoded_state, profile_id).await?;
        let mut redirect = parse_redirect(&request)?;

        self.delete_pending(encoded_state);

        redirect
            .query_pairs_mut()
            .append_pair("error", "access_denied")
            .append_pair("state", &request.state);

        info!(client_id = %request.client_id, profile_id = %profile_id, "authorization request rejected");
        Ok(redirect.into())
    }

    async fn pending_for_decision(
        &self,
        encoded_state: &str,
        profile_id: &ProfileId,
    ) -> ApplicationResult<AuthorizationRequest> {
        let request = self
            .load_pending(encoded_state)?
            .ok_or(AuthorizationError::UnknownTransaction)?;

        ensure_profile_matches(&request, profile_id)?;
        // Pending requests are stored before the owner logs in, so the
        // redirect target is checked again before anything is sent to it.
        self.validated_client(&request).await?;

        Ok(request)
    }
}

fn parse_redirect(request: &AuthorizationRequest) -> ApplicationResult<Url> {
    Url::parse(&request.redirect_uri)
        .map_err(|err| ApplicationError::validation(format!("invalid redirect URI: {err}")))
}
