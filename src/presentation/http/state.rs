// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Values the HTTP layer needs beyond the application services.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub issuer: String,
    pub domain: String,
    pub cookie_name: String,
}

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub settings: Arc<HttpSettings>,
    initialised: Arc<AtomicBool>,
}

impl HttpState {
    pub fn new(services: Arc<ApplicationServices>, settings: HttpSettings, initialised: bool) -> Self {
        Self {
            services,
            settings: Arc::new(settings),
            initialised: Arc::new(AtomicBool::new(initialised)),
        }
    }

    /// Whether the owner's profile has been created.
    pub fn is_initialised(&self) -> bool {
        self.initialised.load(Ordering::Acquire)
    }

    pub fn mark_initialised(&self) {
        self.initialised.store(true, Ordering::Release);
    }
}
