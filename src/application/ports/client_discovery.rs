// src/application/ports/client_discovery.rs
use crate::domain::authorization::ClientMetadata;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("error getting the response from the client: {0}")]
    Transport(String),
    #[error("timed out after {0:?} waiting for the client")]
    Timeout(Duration),
    #[error("received a bad status from the client: {code}")]
    BadStatus { code: u16 },
    #[error("unsupported content type '{content_type}'")]
    UnsupportedContentType { content_type: String },
    #[error("unable to decode the client metadata: {0}")]
    Decode(String),
}

#[async_trait]
pub trait ClientDiscovery: Send + Sync {
    /// Fetch the metadata published at `client_id`.
    async fn fetch(&self, client_id: &str) -> Result<ClientMetadata, DiscoveryError>;
}
