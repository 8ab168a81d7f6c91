// src/application/ports/mod.rs
pub mod cache;
pub mod client_discovery;
pub mod security;
pub mod time;
pub mod util;

// Type aliases to make port injection sites more descriptive and reduce `dyn` noise
pub type ExpiringStorePort = dyn cache::ExpiringStore;
pub type ClientDiscoveryPort = dyn client_discovery::ClientDiscovery;
pub type PasswordHasherPort = dyn security::PasswordHasher;
pub type SessionTokenManagerPort = dyn security::SessionTokenManager;
pub type ClockPort = dyn time::Clock;
pub type CodeGeneratorPort = dyn util::CodeGenerator;
