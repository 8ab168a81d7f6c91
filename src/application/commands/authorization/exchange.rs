// src/application/commands/authorization/exchange.rs
use super::{AuthorizationCommandService, AuthorizationError, service::decode};
use crate::{
    application::{
        dto::{ExchangeForm, ProfileClaimsDto, ProfileExchangeDto, TokenExchangeDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        authorization::{EMAIL_SCOPE, IssuedCode, PROFILE_SCOPE, verify_code_challenge},
        profile::ProfileId,
        url::validate_and_canonicalize_url,
    },
};
use tracing::info;

const AUTHORIZATION_CODE_GRANT: &str = "authorization_code";

impl AuthorizationCommandService {
    /// Exchange a code for the owner's identity at the authorization endpoint.
    pub async fn profile_exchange(&self, form: &ExchangeForm) -> ApplicationResult<ProfileExchangeDto> {
        let issued = self.redeem(form)?;
        let profile = self.profile_claims(&issued).await?;

        info!(client_id = %issued.client_id, "profile exchange completed");
        Ok(ProfileExchangeDto {
            me: issued.profile_id,
            profile,
        })
    }

    /// Exchange a code for a bearer token at the token endpoint. A token is
    /// only minted when the owner granted at least one scope.
    pub async fn token_exchange(&self, form: &ExchangeForm) -> ApplicationResult<TokenExchangeDto> {
        let issued = self.redeem(form)?;

        let access_token = if issued.scopes.is_empty() {
            String::new()
        } else {
            self.code_generator.bearer_token()?
        };
        let profile = self.profile_claims(&issued).await?;

        info!(client_id = %issued.client_id, scope = %issued.scope(), "token exchange completed");
        Ok(TokenExchangeDto {
            access_token,
            token_type: "Bearer".into(),
            scope: issued.scope(),
            me: issued.profile_id,
            profile,
        })
    }

    /// Consume the code and check it against the exchange request. The code
    /// is removed from the cache before any check runs, so it can be used at
    /// most once whatever the outcome.
    fn redeem(&self, form: &ExchangeForm) -> ApplicationResult<IssuedCode> {
        let entry = form
            .code
            .as_deref()
            .filter(|code| !code.is_empty())
            .and_then(|code| self.cache.take(&Self::code_key(code)));

        match form.grant_type.as_str() {
            "" => return Err(AuthorizationError::MissingGrantType.into()),
            AUTHORIZATION_CODE_GRANT => {}
            other => return Err(AuthorizationError::UnsupportedGrantType(other.to_owned()).into()),
        }

        let entry = entry.ok_or(AuthorizationError::MissingAuthorizationCode)?;
        if entry.expired_at(self.clock.now()) {
            return Err(AuthorizationError::ExpiredAuthorizationCode.into());
        }

        let issued: IssuedCode = decode(entry.value())?;

        let client_id = validate_and_canonicalize_url(&form.client_id, true)
            .map_err(|_| AuthorizationError::MismatchedClientId)?;
        if client_id != issued.client_id {
            return Err(AuthorizationError::MismatchedClientId.into());
        }

        if form.redirect_uri != issued.redirect_uri {
            return Err(AuthorizationError::MismatchedRedirectUri.into());
        }

        verify_code_challenge(
            &issued.code_challenge_method,
            &issued.code_challenge,
            &form.code_verifier,
        )?;

        Ok(issued)
    }

    async fn profile_claims(&self, issued: &IssuedCode) -> ApplicationResult<Option<ProfileClaimsDto>> {
        if !issued.has_scope(PROFILE_SCOPE) {
            return Ok(None);
        }

        let profile_id = ProfileId::from_canonical(issued.profile_id.clone());
        let profile = self
            .profile_repo
            .find_by_id(&profile_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::infrastructure(format!(
                    "unable to get the profile information for {profile_id}"
                ))
            })?;

        let info = profile.information;
        Ok(Some(ProfileClaimsDto {
            name: info.name,
            url: info.url,
            photo: info.photo,
            email: issued.has_scope(EMAIL_SCOPE).then_some(info.email),
        }))
    }
}
