// src/infrastructure/security/token.rs
use crate::{
    application::{
        dto::SessionTokenDto,
        ports::security::{SessionClaims, SessionTokenError, SessionTokenManager},
    },
    domain::profile::{ProfileId, TokenVersion},
};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ALGORITHM: Algorithm = Algorithm::HS512;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    iss: String,
    iat: i64,
    exp: i64,
    sub: String,
    #[serde(rename = "tokenVersion")]
    token_version: i64,
}

/// HMAC-signed session tokens binding a profile to its current token version.
#[derive(Clone)]
pub struct JwtSessionTokenManager {
    issuer: String,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtSessionTokenManager {
    pub fn new(issuer: impl Into<String>, secret: &[u8], ttl: Duration) -> Self {
        let issuer = issuer.into();

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iat", "iss", "sub"]);

        Self {
            issuer,
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    fn sign(&self, claims: &Claims) -> Result<String, SessionTokenError> {
        encode(&Header::new(ALGORITHM), claims, &self.encoding)
            .map_err(|err| SessionTokenError::Signing(err.to_string()))
    }
}

fn ttl_seconds(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)
}

#[async_trait]
impl SessionTokenManager for JwtSessionTokenManager {
    async fn issue(
        &self,
        profile_id: &ProfileId,
        token_version: TokenVersion,
    ) -> Result<SessionTokenDto, SessionTokenError> {
        let issued_at = Utc::now();
        let expires_in = ttl_seconds(self.ttl);
        let expires_at = issued_at + ChronoDuration::seconds(expires_in);

        let token = self.sign(&Claims {
            iss: self.issuer.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            sub: profile_id.to_string(),
            token_version: token_version.value(),
        })?;

        Ok(SessionTokenDto {
            token,
            issued_at,
            expires_at,
            expires_in,
        })
    }

    async fn validate(&self, token: &str) -> Result<SessionClaims, SessionTokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::InvalidSignature => SessionTokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => SessionTokenError::Expired,
                _ => SessionTokenError::Malformed,
            }
        })?;

        Ok(SessionClaims {
            profile_id: ProfileId::from_canonical(data.claims.sub),
            token_version: TokenVersion::new(data.claims.token_version),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUER: &str = "https://auth.example/";

    fn manager(secret: &[u8]) -> JwtSessionTokenManager {
        JwtSessionTokenManager::new(ISSUER, secret, Duration::from_secs(3600))
    }

    fn profile() -> ProfileId {
        ProfileId::parse("https://bill.example/").unwrap()
    }

    #[tokio::test]
    async fn issued_token_validates() {
        let manager = manager(b"secret");
        let session = manager.issue(&profile(), TokenVersion::new(5)).await.unwrap();
        assert_eq!(session.expires_in, 3600);

        let claims = manager.validate(&session.token).await.unwrap();
        assert_eq!(claims.profile_id, profile());
        assert_eq!(claims.token_version, TokenVersion::new(5));
    }

    #[tokio::test]
    async fn wrong_secret_is_an_invalid_signature() {
        let session = manager(b"secret").issue(&profile(), TokenVersion::INITIAL).await.unwrap();
        assert_eq!(
            manager(b"other").validate(&session.token).await,
            Err(SessionTokenError::InvalidSignature)
        );
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let manager = manager(b"secret");
        let now = Utc::now().timestamp();
        let token = manager
            .sign(&Claims {
                iss: ISSUER.into(),
                iat: now - 120,
                exp: now - 60,
                sub: profile().to_string(),
                token_version: 0,
            })
            .unwrap();
        assert_eq!(manager.validate(&token).await, Err(SessionTokenError::Expired));
    }

    #[tokio::test]
    async fn garbage_is_malformed() {
        assert_eq!(
            manager(b"secret").validate("not.a.token").await,
            Err(SessionTokenError::Malformed)
        );
    }

    #[tokio::test]
    async fn foreign_issuer_is_rejected() {
        let session = JwtSessionTokenManager::new("https://other.example/", b"secret", Duration::from_secs(60))
            .issue(&profile(), TokenVersion::INITIAL)
            .await
            .unwrap();
        assert_eq!(
            manager(b"secret").validate(&session.token).await,
            Err(SessionTokenError::Malformed)
        );
    }
}
