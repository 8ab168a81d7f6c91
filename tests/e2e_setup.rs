use axum::http::StatusCode;
use indieauth_server::{
    domain::profile::ProfileId,
    infrastructure::{repositories::InMemoryProfileRepository, security::Argon2PasswordHasher},
};
use std::sync::Arc;

mod support;

use support::*;

fn setup_form<'a>(password: &'a str, confirmed: &'a str) -> Vec<(&'static str, &'a str)> {
    vec![
        ("profile_id", "owner.example"),
        ("password", password),
        ("confirmed_password", confirmed),
        ("display_name", "Owner"),
        ("url", ""),
        ("photo_url", ""),
        ("email", ""),
    ]
}

#[tokio::test]
async fn every_route_leads_to_setup_until_initialised() {
    let app = test_app().await;

    for uri in ["/", "/profile/login", "/.well-known/oauth-authorization-server"] {
        let response = app.send(get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/setup");
    }

    let response = app.send(get("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.send(get("/setup", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["setup_required"], true);
}

#[tokio::test]
async fn setup_creates_the_profile_once() {
    let app = test_app().await;
    app.setup_profile().await;

    let response = app.send(get("/setup", None)).await;
    assert_eq!(body_json(response).await["setup_required"], false);

    let response = app.send(get("/.well-known/oauth-authorization-server", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .send(post_form("/setup", &setup_form(PASSWORD, PASSWORD), None))
        .await;
    assert_error_response(response, StatusCode::FORBIDDEN).await;
}

#[tokio::test]
async fn concurrent_setups_create_a_single_profile() {
    let app = test_app_with(
        Arc::new(InMemoryProfileRepository::new()),
        Arc::new(Argon2PasswordHasher),
    )
    .await;

    let mut alice = setup_form(PASSWORD, PASSWORD);
    alice[0] = ("profile_id", "alice.example");
    let mut bob = setup_form(PASSWORD, PASSWORD);
    bob[0] = ("profile_id", "bob.example");

    // Both requests pass the initial check before either finishes hashing.
    let (first, second) = tokio::join!(
        app.send(post_form("/setup", &alice, None)),
        app.send(post_form("/setup", &bob, None))
    );

    let mut statuses = [first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::SEE_OTHER, StatusCode::FORBIDDEN]);

    let mut created = 0;
    for id in ["alice.example", "bob.example"] {
        let id = ProfileId::parse(id).unwrap();
        if app.profile_repo.exists(&id).await.unwrap() {
            created += 1;
        }
    }
    assert_eq!(created, 1);
}

#[tokio::test]
async fn setup_validates_its_input() {
    let app = test_app().await;

    let response = app
        .send(post_form("/setup", &setup_form("short", "short"), None))
        .await;
    let message = assert_error_response(response, StatusCode::BAD_REQUEST).await;
    assert!(message.contains("at least 8"));

    let response = app
        .send(post_form("/setup", &setup_form(PASSWORD, "something else"), None))
        .await;
    let message = assert_error_response(response, StatusCode::BAD_REQUEST).await;
    assert!(message.contains("do not match"));

    let mut form = setup_form(PASSWORD, PASSWORD);
    form[0] = ("profile_id", "https://127.0.0.1/");
    let response = app.send(post_form("/setup", &form, None)).await;
    assert_error_response(response, StatusCode::BAD_REQUEST).await;

    // Nothing was created by the failed attempts.
    assert!(!app.state.is_initialised());
}

#[tokio::test]
async fn argon2_hashed_password_logs_in() {
    let app = test_app_with(
        Arc::new(InMemoryProfileRepository::new()),
        Arc::new(Argon2PasswordHasher),
    )
    .await;
    app.setup_profile().await;

    let cookie = app.login().await;
    assert!(cookie.starts_with(COOKIE_NAME));

    let response = app
        .send(post_form(
            "/profile/login",
            &[
                ("profile_id", PROFILE_ID),
                ("password", "definitely wrong"),
                ("login_type", "profile"),
            ],
            None,
        ))
        .await;
    assert_error_response(response, StatusCode::UNAUTHORIZED).await;
}
