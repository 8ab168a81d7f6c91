// src/application/commands/profile/mod.rs
mod login;
mod logout;
mod service;
mod setup;
mod update;

pub use login::{LoginProfileCommand, LoginResult, LoginType};
pub use service::ProfileCommandService;
pub use setup::{MIN_PASSWORD_LENGTH, SetupProfileCommand};
pub use update::UpdateProfileCommand;
