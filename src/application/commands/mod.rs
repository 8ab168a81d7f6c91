// src/application/commands/mod.rs
pub mod authorization;
pub mod profile;
