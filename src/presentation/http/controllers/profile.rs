// src/presentation/http/controllers/profile.rs
use crate::application::{
    commands::profile::{LoginProfileCommand, LoginType, UpdateProfileCommand},
    dto::ProfileDto,
    error::ApplicationError,
};
use crate::presentation::http::{
    controllers::no_store,
    cookies::{cleared_session_cookie, session_cookie},
    error::{HttpError, HttpResult, IntoHttpResult},
    extractors::MaybeProfileSession,
    routes::{AUTHORIZATION_PATH, LOGIN_PATH, OVERVIEW_PATH},
    state::HttpState,
};
use axum::{
    Extension, Form, Json,
    extract::Query,
    http::{HeaderValue, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

fn default_login_type() -> String {
    LoginType::Profile.as_str().to_owned()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginPrefill {
    #[serde(default = "default_login_type")]
    pub login_type: String,
    #[serde(default)]
    pub profile_id: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub profile_id: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_login_type")]
    pub login_type: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct OverviewForm {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub email: String,
}

fn cookie_error(err: impl std::fmt::Display) -> HttpError {
    HttpError::from_error(ApplicationError::infrastructure(format!(
        "unable to build the session cookie: {err}"
    )))
}

fn redirect_with_cookie(location: &str, cookie: HeaderValue) -> Response {
    ([(SET_COOKIE, cookie)], Redirect::to(location)).into_response()
}

/// `GET /`
pub async fn root(MaybeProfileSession(session): MaybeProfileSession) -> Redirect {
    if session.is_some() {
        Redirect::to(OVERVIEW_PATH)
    } else {
        Redirect::to(&format!("{LOGIN_PATH}?login_type=profile"))
    }
}

/// `GET /profile/login`: the values the login form is prefilled with.
pub async fn login_page(Query(prefill): Query<LoginPrefill>) -> HttpResult<Json<LoginPrefill>> {
    prefill.login_type.parse::<LoginType>().into_http()?;
    Ok(Json(prefill))
}

/// `POST /profile/login`
pub async fn login(
    Extension(state): Extension<HttpState>,
    Form(form): Form<LoginForm>,
) -> HttpResult<Response> {
    let login_type = form.login_type.parse::<LoginType>().into_http()?;

    let result = state
        .services
        .profile_commands
        .login(LoginProfileCommand {
            profile_id: form.profile_id,
            password: form.password,
        })
        .await
        .into_http()?;

    let cookie = session_cookie(
        &state.settings,
        &result.session.token,
        result.session.expires_in,
    )
    .map_err(cookie_error)?;

    let location = match login_type {
        LoginType::Profile => OVERVIEW_PATH.to_owned(),
        LoginType::IndieAuth => {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("state", &form.state)
                .finish();
            format!("{AUTHORIZATION_PATH}?{query}")
        }
    };

    Ok(redirect_with_cookie(&location, cookie))
}

/// `POST /profile/logout`: revokes every session of the profile.
pub async fn logout(
    Extension(state): Extension<HttpState>,
    MaybeProfileSession(session): MaybeProfileSession,
) -> HttpResult<Response> {
    let login = format!("{LOGIN_PATH}?login_type=profile");
    let Some(session) = session else {
        return Ok(Redirect::to(&login).into_response());
    };

    state
        .services
        .profile_commands
        .logout(&session.profile_id)
        .await
        .into_http()?;

    let cookie = cleared_session_cookie(&state.settings).map_err(cookie_error)?;
    Ok(redirect_with_cookie(&login, cookie))
}

/// `GET /profile/overview`
pub async fn overview(
    Extension(state): Extension<HttpState>,
    MaybeProfileSession(session): MaybeProfileSession,
) -> HttpResult<Response> {
    let Some(session) = session else {
        return Ok(Redirect::to(&format!("{LOGIN_PATH}?login_type=profile")).into_response());
    };

    let profile: ProfileDto = state
        .services
        .profile_queries
        .get_profile(&session.profile_id)
        .await
        .into_http()?;

    Ok((no_store(), Json(profile)).into_response())
}

/// `POST /profile/overview`
pub async fn update_overview(
    Extension(state): Extension<HttpState>,
    MaybeProfileSession(session): MaybeProfileSession,
    Form(form): Form<OverviewForm>,
) -> HttpResult<Response> {
    let Some(session) = session else {
        return Ok(Redirect::to(&format!("{LOGIN_PATH}?login_type=profile")).into_response());
    };

    let profile = state
        .services
        .profile_commands
        .update_information(UpdateProfileCommand {
            profile_id: session.profile_id,
            display_name: form.display_name,
            url: form.url,
            photo_url: form.photo_url,
            email: form.email,
        })
        .await
        .into_http()?;

    Ok((no_store(), Json(profile)).into_response())
}
