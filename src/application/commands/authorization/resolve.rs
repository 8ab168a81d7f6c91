// src/application/commands/authorization/resolve.rs
use super::{AuthorizationCommandService, AuthorizationError};
use crate::{
    application::{
        dto::{AuthorizationQuery, ConsentDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        authorization::{AuthorizationRequest, CodeChallengeMethod},
        profile::ProfileId,
        url::validate_and_canonicalize_url,
    },
};
use tracing::{debug, info};

/// A stored authorization request and the token that resumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAuthorization {
    pub request: AuthorizationRequest,
    pub encoded_state: String,
}

impl AuthorizationCommandService {
    /// Resume the transaction named by the `state` parameter or start a new
    /// one from the remaining query parameters. Only a request without a
    /// `client_id` (the shape of the return from login) can resume; a client
    /// request always starts or reuses its own transaction.
    pub fn resolve_request(
        &self,
        query: &AuthorizationQuery,
    ) -> ApplicationResult<PendingAuthorization> {
        if let (None, Some(token)) = (query.client_id.as_deref(), query.state.as_deref()) {
            if let Some(request) = self.load_pending(token)? {
                debug!(encoded_state = %token, "resumed pending authorization request");
                return Ok(PendingAuthorization {
                    request,
                    encoded_state: token.to_owned(),
                });
            }
        }

        let request = build_request(query)?;
        let encoded_state = request.encoded_state();

        match self.load_pending(&encoded_state)? {
            Some(existing) if existing == request => {}
            Some(_) => return Err(AuthorizationError::StateInUse.into()),
            None => {
                self.store_pending(&request, &encoded_state)?;
                info!(client_id = %request.client_id, "stored new authorization request");
            }
        }

        Ok(PendingAuthorization {
            request,
            encoded_state,
        })
    }

    /// Build the consent view for an authenticated owner after checking the
    /// client against its published metadata.
    pub async fn review(
        &self,
        query: &AuthorizationQuery,
        profile_id: &ProfileId,
    ) -> ApplicationResult<ConsentDto> {
        let PendingAuthorization {
            request,
            encoded_state,
        } = self.resolve_request(query)?;

        ensure_profile_matches(&request, profile_id)?;

        let metadata = self.validated_client(&request).await?;
        let authorization_path = &self.endpoints.authorization_path;

        Ok(ConsentDto {
            client_id: metadata.client_id,
            client_name: metadata.client_name,
            client_uri: metadata.client_uri,
            logo_uri: metadata.logo_uri,
            redirect_uri: request.redirect_uri,
            profile_id: profile_id.to_string(),
            accept_uri: format!("{authorization_path}/accept"),
            reject_uri: format!("{authorization_path}/reject"),
            state: encoded_state,
            scopes: request.scopes,
        })
    }
}

pub(super) fn ensure_profile_matches(
    request: &AuthorizationRequest,
    profile_id: &ProfileId,
) -> Result<(), AuthorizationError> {
    match request.me.as_deref() {
        Some(me) if me != profile_id.as_str() => Err(AuthorizationError::MismatchedProfile {
            authenticated: profile_id.to_string(),
            requested: me.to_owned(),
        }),
        _ => Ok(()),
    }
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, AuthorizationError> {
    value.ok_or(AuthorizationError::MissingParameter(name))
}

fn build_request(query: &AuthorizationQuery) -> ApplicationResult<AuthorizationRequest> {
    let client_id = required(query.client_id.as_deref(), "client_id")?;
    let code_challenge = required(query.code_challenge.as_deref(), "code_challenge")?;
    let code_challenge_method =
        required(query.code_challenge_method.as_deref(), "code_challenge_method")?;
    let redirect_uri = required(query.redirect_uri.as_deref(), "redirect_uri")?;
    let response_type = required(query.response_type.as_deref(), "response_type")?;
    let state = required(query.state.as_deref(), "state")?;

    if response_type != "code" {
        return Err(AuthorizationError::UnsupportedResponseType(response_type.to_owned()).into());
    }

    code_challenge_method
        .parse::<CodeChallengeMethod>()
        .map_err(|err| ApplicationError::validation(err.to_string()))?;

    let client_id = validate_and_canonicalize_url(client_id, true)?;

    let me = match query.me.as_deref() {
        Some(me) if !me.trim().is_empty() => Some(String::from(ProfileId::parse(me)?)),
        _ => None,
    };

    let scopes = query
        .scope
        .as_deref()
        .map(|scope| scope.split_whitespace().map(str::to_owned).collect())
        .unwrap_or_default();

    Ok(AuthorizationRequest {
        client_id,
        redirect_uri: redirect_uri.to_owned(),
        code_challenge: code_challenge.to_owned(),
        code_challenge_method: code_challenge_method.to_owned(),
        scopes,
        state: state.to_owned(),
        me,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> AuthorizationQuery {
        AuthorizationQuery {
            client_id: Some("app.example".into()),
            code_challenge: Some("challenge".into()),
            code_challenge_method: Some("S256".into()),
            redirect_uri: Some("https://app.example/cb".into()),
            response_type: Some("code".into()),
            state: Some("xyz".into()),
            scope: Some("profile  email".into()),
            me: Some("bill.example".into()),
        }
    }

    #[test]
    fn builds_canonical_request() {
        let request = build_request(&query()).unwrap();
        assert_eq!(request.client_id, "https://app.example/");
        assert_eq!(request.me.as_deref(), Some("https://bill.example/"));
        assert_eq!(request.scopes, vec!["profile", "email"]);
    }

    #[test]
    fn missing_parameter_is_named() {
        let mut q = query();
        q.redirect_uri = None;
        let err = build_request(&q).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Authorization(AuthorizationError::MissingParameter("redirect_uri"))
        ));
    }

    #[test]
    fn scope_is_optional() {
        let mut q = query();
        q.scope = None;
        assert!(build_request(&q).unwrap().scopes.is_empty());
    }

    #[test]
    fn only_code_response_type_is_accepted() {
        let mut q = query();
        q.response_type = Some("token".into());
        assert!(matches!(
            build_request(&q).unwrap_err(),
            ApplicationError::Authorization(AuthorizationError::UnsupportedResponseType(_))
        ));
    }

    #[test]
    fn profile_mismatch_is_detected() {
        let request = build_request(&query()).unwrap();
        let other = ProfileId::parse("alice.example").unwrap();
        assert!(matches!(
            ensure_profile_matches(&request, &other),
            Err(AuthorizationError::MismatchedProfile { .. })
        ));
        let same = ProfileId::parse("bill.example").unwrap();
        assert!(ensure_profile_matches(&request, &same).is_ok());
    }
}
