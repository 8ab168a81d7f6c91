// src/application/commands/profile/update.rs
use super::ProfileCommandService;
use crate::{
    application::{dto::ProfileDto, error::ApplicationResult},
    domain::profile::{ProfileId, ProfileInformation},
};

pub struct UpdateProfileCommand {
    pub profile_id: ProfileId,
    pub display_name: String,
    pub url: String,
    pub photo_url: String,
    pub email: String,
}

impl ProfileCommandService {
    pub async fn update_information(
        &self,
        command: UpdateProfileCommand,
    ) -> ApplicationResult<ProfileDto> {
        let information = ProfileInformation {
            name: command.display_name,
            url: command.url,
            photo: command.photo_url,
            email: command.email,
        };

        let profile = self
            .profile_repo
            .update_information(&command.profile_id, information, self.clock.now())
            .await?;

        Ok(profile.into())
    }
}
