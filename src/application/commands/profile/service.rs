// src/application/commands/profile/service.rs
use std::sync::Arc;

use crate::application::ports::{
    security::{PasswordHasher, SessionTokenManager},
    time::Clock,
};
use crate::domain::profile::ProfileRepository;

pub struct ProfileCommandService {
    pub(super) profile_repo: Arc<dyn ProfileRepository>,
    pub(super) password_hasher: Arc<dyn PasswordHasher>,
    pub(super) session_tokens: Arc<dyn SessionTokenManager>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ProfileCommandService {
    pub fn new(
        profile_repo: Arc<dyn ProfileRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        session_tokens: Arc<dyn SessionTokenManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            profile_repo,
            password_hasher,
            session_tokens,
            clock,
        }
    }
}
