// src/infrastructure/mod.rs
pub mod cache;
pub mod database;
pub mod discovery;
pub mod repositories;
pub mod security;
pub mod time;
pub mod util;
