// src/application/commands/profile/setup.rs
use super::ProfileCommandService;
use crate::{
    application::{
        dto::ProfileDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::profile::{NewProfile, PasswordHash, ProfileId, ProfileInformation},
};
use tracing::{info, warn};

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub struct SetupProfileCommand {
    pub profile_id: String,
    pub password: String,
    pub confirmed_password: String,
    pub display_name: String,
    pub url: String,
    pub photo_url: String,
    pub email: String,
}

impl ProfileCommandService {
    /// Create the single profile this server vouches for.
    pub async fn setup(&self, command: SetupProfileCommand) -> ApplicationResult<ProfileDto> {
        if self.profile_repo.is_initialised().await? {
            return Err(already_initialised());
        }

        let profile_id = ProfileId::parse(&command.profile_id)?;

        if command.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ApplicationError::validation(format!(
                "the password must be at least {MIN_PASSWORD_LENGTH} characters long"
            )));
        }

        if command.password != command.confirmed_password {
            return Err(ApplicationError::validation("the passwords do not match"));
        }

        let hashed = self.password_hasher.hash(&command.password).await?;
        let new_profile = NewProfile::new(
            profile_id,
            PasswordHash::new(hashed)?,
            ProfileInformation {
                name: command.display_name,
                url: command.url,
                photo: command.photo_url,
                email: command.email,
            },
            self.clock.now(),
        );

        // A concurrent setup may have won the race since the check above.
        let Some(profile) = self.profile_repo.insert_initial(new_profile).await? else {
            warn!("rejected setup of an already initialised server");
            return Err(already_initialised());
        };
        info!(profile_id = %profile.id, "profile created");
        Ok(profile.into())
    }
}

fn already_initialised() -> ApplicationError {
    ApplicationError::forbidden("the server has already been initialised")
}
