// src/domain/authorization/client.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Identity a client publishes about itself at its client ID URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMetadata {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_uri: String,
    #[serde(default)]
    pub logo_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientValidationError {
    #[error("the client ID in the authorization request does not match the client ID in the client's metadata")]
    MismatchedClientId,
    #[error("the client URL in the metadata is not a prefix of the client ID")]
    InvalidClientUrl,
    #[error("the redirect URI in the authorization request is invalid")]
    InvalidRedirectUri,
    #[error("unable to parse the {field}: {reason}")]
    Unparsable { field: &'static str, reason: String },
}

/// Checks run in order and the first failure wins.
pub fn validate_client_metadata(
    metadata: &ClientMetadata,
    requested_client_id: &str,
    requested_redirect_uri: &str,
) -> Result<(), ClientValidationError> {
    if metadata.client_id != requested_client_id {
        return Err(ClientValidationError::MismatchedClientId);
    }

    if !metadata.client_id.starts_with(&metadata.client_uri) {
        return Err(ClientValidationError::InvalidClientUrl);
    }

    let client_id = parse(&metadata.client_id, "client ID")?;
    let redirect_uri = parse(requested_redirect_uri, "requested redirect URI")?;

    if same_origin(&client_id, &redirect_uri) {
        return Ok(());
    }

    let registered = metadata
        .redirect_uris
        .iter()
        .any(|uri| uri == requested_redirect_uri || uri == redirect_uri.as_str());

    if registered {
        Ok(())
    } else {
        Err(ClientValidationError::InvalidRedirectUri)
    }
}

fn parse(value: &str, field: &'static str) -> Result<Url, ClientValidationError> {
    Url::parse(value).map_err(|err| ClientValidationError::Unparsable {
        field,
        reason: err.to_string(),
    })
}

fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme()
        && a.host_str() == b.host_str()
        && a.port_or_known_default() == b.port_or_known_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(redirect_uris: &[&str]) -> ClientMetadata {
        ClientMetadata {
            client_id: "https://app.example/".into(),
            client_name: "Example App".into(),
            client_uri: "https://app.example/".into(),
            logo_uri: String::new(),
            redirect_uris: redirect_uris.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    #[test]
    fn same_origin_redirect_is_implicitly_allowed() {
        let result = validate_client_metadata(
            &metadata(&[]),
            "https://app.example/",
            "https://app.example/callback",
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn foreign_redirect_must_be_registered() {
        let result = validate_client_metadata(
            &metadata(&["https://app.example/cb"]),
            "https://app.example/",
            "https://evil.example/cb",
        );
        assert_eq!(result, Err(ClientValidationError::InvalidRedirectUri));
    }

    #[test]
    fn registered_foreign_redirect_is_allowed() {
        let result = validate_client_metadata(
            &metadata(&["https://callback.example/done"]),
            "https://app.example/",
            "https://callback.example/done",
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn different_port_is_a_different_origin() {
        let result = validate_client_metadata(
            &metadata(&[]),
            "https://app.example/",
            "https://app.example:8443/callback",
        );
        assert_eq!(result, Err(ClientValidationError::InvalidRedirectUri));
    }

    #[test]
    fn client_id_mismatch_wins_over_other_failures() {
        let mut meta = metadata(&[]);
        meta.client_uri = "https://other.example/".into();
        let result =
            validate_client_metadata(&meta, "https://elsewhere.example/", "https://evil.example/");
        assert_eq!(result, Err(ClientValidationError::MismatchedClientId));
    }

    #[test]
    fn client_uri_must_prefix_client_id() {
        let mut meta = metadata(&[]);
        meta.client_uri = "https://other.example/".into();
        let result =
            validate_client_metadata(&meta, "https://app.example/", "https://app.example/cb");
        assert_eq!(result, Err(ClientValidationError::InvalidClientUrl));
    }

    #[test]
    fn unparsable_redirect_is_reported() {
        let result = validate_client_metadata(&metadata(&[]), "https://app.example/", "not a url");
        assert!(matches!(
            result,
            Err(ClientValidationError::Unparsable { field: "requested redirect URI", .. })
        ));
    }
}
