// src/presentation/http/controllers/authorization.rs
use crate::application::dto::{
    AuthorizationQuery, ConsentDto, ExchangeForm, ProfileExchangeDto, TokenExchangeDto,
};
use crate::presentation::http::{
    controllers::no_store,
    error::{HttpResult, IntoHttpResult},
    extractors::{MaybeProfileSession, ProfileSession},
    routes::LOGIN_PATH,
    state::HttpState,
};
use axum::{
    Extension, Form, Json,
    extract::Query,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::debug;
use url::form_urlencoded;

#[derive(Debug, Deserialize)]
pub struct DecisionForm {
    #[serde(default)]
    pub state: String,
}

/// `GET <authorization endpoint>`: send an anonymous visitor to the login page
/// with the stored transaction, or show the owner what the client asks for.
pub async fn authorize(
    Extension(state): Extension<HttpState>,
    MaybeProfileSession(session): MaybeProfileSession,
    Query(query): Query<AuthorizationQuery>,
) -> HttpResult<Response> {
    let commands = &state.services.authorization_commands;

    let Some(session) = session else {
        let pending = commands.resolve_request(&query).into_http()?;
        let login_query = form_urlencoded::Serializer::new(String::new())
            .append_pair("login_type", "indieauth")
            .append_pair("profile_id", pending.request.me.as_deref().unwrap_or_default())
            .append_pair("state", &pending.encoded_state)
            .finish();

        debug!(client_id = %pending.request.client_id, "redirecting to login before consent");
        return Ok(Redirect::to(&format!("{LOGIN_PATH}?{login_query}")).into_response());
    };

    let consent: ConsentDto = commands
        .review(&query, &session.profile_id)
        .await
        .into_http()?;

    Ok((no_store(), Json(consent)).into_response())
}

/// `POST <authorization endpoint>/accept`
pub async fn accept(
    Extension(state): Extension<HttpState>,
    ProfileSession(session): ProfileSession,
    Form(form): Form<DecisionForm>,
) -> HttpResult<Redirect> {
    let location = state
        .services
        .authorization_commands
        .accept(&form.state, &session.profile_id)
        .await
        .into_http()?;

    Ok(Redirect::to(&location))
}

/// `POST <authorization endpoint>/reject`
pub async fn reject(
    Extension(state): Extension<HttpState>,
    ProfileSession(session): ProfileSession,
    Form(form): Form<DecisionForm>,
) -> HttpResult<Redirect> {
    let location = state
        .services
        .authorization_commands
        .reject(&form.state, &session.profile_id)
        .await
        .into_http()?;

    Ok(Redirect::to(&location))
}

/// `POST <authorization endpoint>`: redeem a code for the profile URL only.
pub async fn exchange_profile(
    Extension(state): Extension<HttpState>,
    Form(form): Form<ExchangeForm>,
) -> HttpResult<Response> {
    let exchanged: ProfileExchangeDto = state
        .services
        .authorization_commands
        .profile_exchange(&form)
        .await
        .into_http()?;

    Ok((no_store(), Json(exchanged)).into_response())
}

/// `POST <token endpoint>`
pub async fn exchange_token(
    Extension(state): Extension<HttpState>,
    Form(form): Form<ExchangeForm>,
) -> HttpResult<Response> {
    let exchanged: TokenExchangeDto = state
        .services
        .authorization_commands
        .token_exchange(&form)
        .await
        .into_http()?;

    Ok((no_store(), Json(exchanged)).into_response())
}
