// src/infrastructure/discovery/mod.rs
mod microformats;

pub use microformats::metadata_from_html;

use crate::{
    application::ports::client_discovery::{ClientDiscovery, DiscoveryError},
    domain::authorization::ClientMetadata,
};
use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use std::time::Duration;
use tracing::{debug, warn};

pub const USER_AGENT_PRODUCT: &str = env!("CARGO_PKG_NAME");
pub const USER_AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fetches client metadata over HTTP, identifying this server in the User-Agent.
#[derive(Clone)]
pub struct HttpClientDiscovery {
    client: Client,
    timeout: Duration,
}

impl HttpClientDiscovery {
    pub fn new(issuer: &str, timeout: Duration) -> Result<Self, DiscoveryError> {
        let client = Client::builder()
            .user_agent(user_agent(issuer))
            .build()
            .map_err(|err| DiscoveryError::Transport(err.to_string()))?;

        Ok(Self { client, timeout })
    }

    async fn fetch_metadata(&self, client_id: &str) -> Result<ClientMetadata, DiscoveryError> {
        let response = self
            .client
            .get(client_id)
            .send()
            .await
            .map_err(|err| DiscoveryError::Transport(err.to_string()))?;

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(DiscoveryError::BadStatus {
                code: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        match media_type(&content_type).as_str() {
            "application/json" => response
                .json::<ClientMetadata>()
                .await
                .map_err(|err| DiscoveryError::Decode(err.to_string())),
            "text/html" => {
                let body = response
                    .text()
                    .await
                    .map_err(|err| DiscoveryError::Transport(err.to_string()))?;
                Ok(metadata_from_html(&body, client_id))
            }
            _ => Err(DiscoveryError::UnsupportedContentType { content_type }),
        }
    }
}

pub fn user_agent(issuer: &str) -> String {
    format!("{USER_AGENT_PRODUCT}/{USER_AGENT_VERSION} (+{issuer})")
}

/// The media type of a Content-Type value without its parameters.
fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[async_trait]
impl ClientDiscovery for HttpClientDiscovery {
    async fn fetch(&self, client_id: &str) -> Result<ClientMetadata, DiscoveryError> {
        debug!(client_id, "fetching client metadata");

        let result = tokio::time::timeout(self.timeout, self.fetch_metadata(client_id))
            .await
            .unwrap_or(Err(DiscoveryError::Timeout(self.timeout)));

        if let Err(err) = &result {
            warn!(client_id, error = %err, "client discovery failed");
        }
        result
    }
}
