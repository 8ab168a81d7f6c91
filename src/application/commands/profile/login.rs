// src/application/commands/profile/login.rs
use super::ProfileCommandService;
use crate::{
    application::{
        dto::SessionTokenDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::profile::ProfileId,
};
use std::{fmt, str::FromStr};
use tracing::{info, warn};

/// Where the owner goes after logging in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginType {
    Profile,
    IndieAuth,
}

impl LoginType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginType::Profile => "profile",
            LoginType::IndieAuth => "indieauth",
        }
    }
}

impl fmt::Display for LoginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoginType {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profile" => Ok(LoginType::Profile),
            "indieauth" => Ok(LoginType::IndieAuth),
            other => Err(ApplicationError::validation(format!(
                "unrecognised login type '{other}'"
            ))),
        }
    }
}

pub struct LoginProfileCommand {
    pub profile_id: String,
    pub password: String,
}

pub struct LoginResult {
    pub profile_id: ProfileId,
    pub session: SessionTokenDto,
}

impl ProfileCommandService {
    pub async fn login(&self, command: LoginProfileCommand) -> ApplicationResult<LoginResult> {
        let profile_id = ProfileId::parse(&command.profile_id).map_err(|err| {
            warn!(error = %err, "login attempt with an invalid profile id");
            ApplicationError::unauthorized("invalid credentials")
        })?;

        let Some(profile) = self.profile_repo.find_by_id(&profile_id).await? else {
            warn!(profile_id = %profile_id, "login attempt for an unknown profile");
            return Err(ApplicationError::unauthorized("invalid credentials"));
        };

        self.password_hasher
            .verify(&command.password, profile.password_hash.as_str())
            .await?;

        let session = self
            .session_tokens
            .issue(&profile.id, profile.token_version)
            .await?;

        info!(profile_id = %profile.id, "profile logged in");
        Ok(LoginResult {
            profile_id: profile.id,
            session,
        })
    }
}
