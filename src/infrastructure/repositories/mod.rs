// src/infrastructure/repositories/mod.rs
mod error;
mod memory_profile;
mod sqlite_profile;

pub use memory_profile::InMemoryProfileRepository;
pub use sqlite_profile::SqliteProfileRepository;
