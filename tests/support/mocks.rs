// tests/support/mocks.rs
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use indieauth_server::{
    application::{
        ApplicationResult,
        error::ApplicationError,
        ports::{
            client_discovery::{ClientDiscovery, DiscoveryError},
            security::PasswordHasher,
            time::Clock,
            util::CodeGenerator,
        },
    },
    domain::authorization::ClientMetadata,
};
use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Serves canned client metadata keyed by client ID.
#[derive(Default)]
pub struct StaticClientDiscovery {
    clients: Mutex<HashMap<String, ClientMetadata>>,
    calls: AtomicUsize,
}

impl StaticClientDiscovery {
    pub fn with_client(metadata: ClientMetadata) -> Self {
        let discovery = Self::default();
        discovery.register(metadata);
        discovery
    }

    pub fn register(&self, metadata: ClientMetadata) {
        self.clients
            .lock()
            .unwrap()
            .insert(metadata.client_id.clone(), metadata);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClientDiscovery for StaticClientDiscovery {
    async fn fetch(&self, client_id: &str) -> Result<ClientMetadata, DiscoveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.clients
            .lock()
            .unwrap()
            .get(client_id)
            .cloned()
            .ok_or(DiscoveryError::BadStatus { code: 404 })
    }
}

/// Predictable codes and tokens: `code-1`, `code-2`, ... and `token-1`, ...
#[derive(Default)]
pub struct SequentialCodeGenerator {
    codes: AtomicUsize,
    tokens: AtomicUsize,
}

impl CodeGenerator for SequentialCodeGenerator {
    fn authorization_code(&self) -> ApplicationResult<String> {
        let n = self.codes.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("code-{n}"))
    }

    fn bearer_token(&self) -> ApplicationResult<String> {
        let n = self.tokens.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("token-{n}"))
    }
}

/// A clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Stores passwords with a marker prefix instead of hashing them.
pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("plain:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash.strip_prefix("plain:") == Some(password) {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}
