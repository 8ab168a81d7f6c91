// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

pub type CredentialRateLimit = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

/// Per-IP limiter for the routes that accept passwords or authorization codes.
pub fn credential_rate_limit(per_second: u64, burst_size: u32) -> CredentialRateLimit {
    let mut builder = GovernorConfigBuilder::default();
    builder.per_second(per_second);
    builder.burst_size(burst_size);
    let config = builder
        .key_extractor(SmartIpKeyExtractor)
        .finish()
        .expect("valid rate limit configuration");

    GovernorLayer::new(config)
}
