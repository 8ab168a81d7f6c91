// src/presentation/http/middleware/mod.rs
pub mod entrypoint;
pub mod rate_limit;
