// src/domain/profile/mod.rs
pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{NewProfile, Profile, ProfileInformation};
pub use repository::ProfileRepository;
pub use value_objects::{PasswordHash, ProfileId, TokenVersion};
