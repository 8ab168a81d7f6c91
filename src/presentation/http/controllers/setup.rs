// src/presentation/http/controllers/setup.rs
use crate::application::commands::profile::SetupProfileCommand;
use crate::presentation::http::{
    error::{HttpResult, IntoHttpResult},
    routes::LOGIN_PATH,
    state::HttpState,
};
use axum::{Extension, Form, Json, response::Redirect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct SetupStatus {
    pub setup_required: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetupForm {
    #[serde(default)]
    pub profile_id: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirmed_password: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub email: String,
}

pub async fn setup_status(Extension(state): Extension<HttpState>) -> HttpResult<Json<SetupStatus>> {
    let initialised = state
        .services
        .profile_queries
        .is_initialised()
        .await
        .into_http()?;

    Ok(Json(SetupStatus {
        setup_required: !initialised,
    }))
}

pub async fn setup(
    Extension(state): Extension<HttpState>,
    Form(form): Form<SetupForm>,
) -> HttpResult<Redirect> {
    let command = SetupProfileCommand {
        profile_id: form.profile_id,
        password: form.password,
        confirmed_password: form.confirmed_password,
        display_name: form.display_name,
        url: form.url,
        photo_url: form.photo_url,
        email: form.email,
    };

    state
        .services
        .profile_commands
        .setup(command)
        .await
        .into_http()?;
    state.mark_initialised();

    Ok(Redirect::to(&format!("{LOGIN_PATH}?login_type=profile")))
}
