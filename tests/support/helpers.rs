// tests/support/helpers.rs
use super::mocks::{
    ManualClock, PlainPasswordHasher, SequentialCodeGenerator, StaticClientDiscovery,
};
use axum::{
    Router,
    body::{self, Body},
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use indieauth_server::{
    application::{
        commands::authorization::AuthorizationEndpoints,
        ports::{
            cache::ExpiringStore,
            client_discovery::ClientDiscovery,
            security::{PasswordHasher, SessionTokenManager},
            time::Clock,
            util::CodeGenerator,
        },
        services::ApplicationServices,
    },
    domain::{authorization::ClientMetadata, profile::ProfileRepository},
    infrastructure::{
        cache::TtlCache, repositories::InMemoryProfileRepository,
        security::JwtSessionTokenManager,
    },
    presentation::http::{
        routes::{AUTHORIZATION_PATH, build_router_with_rate_limiter},
        state::{HttpSettings, HttpState},
    },
};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tower::util::ServiceExt as _;
use url::{Url, form_urlencoded};

pub const DOMAIN: &str = "auth.example";
pub const ISSUER: &str = "https://auth.example/";
pub const COOKIE_NAME: &str = "indieauth_session";
pub const JWT_SECRET: &[u8] = b"integration-test-secret";

pub const PROFILE_ID: &str = "https://owner.example/";
pub const PASSWORD: &str = "correct horse battery";

pub const CLIENT_ID: &str = "https://app.example/";
pub const REDIRECT_URI: &str = "https://app.example/callback";
pub const CLIENT_STATE: &str = "client-state-1";

// RFC 7636 appendix B.
pub const CODE_VERIFIER: &str = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
pub const CODE_CHALLENGE: &str = "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM";

pub fn example_client() -> ClientMetadata {
    ClientMetadata {
        client_id: CLIENT_ID.into(),
        client_name: "Example App".into(),
        client_uri: CLIENT_ID.into(),
        logo_uri: "https://app.example/logo.png".into(),
        redirect_uris: vec![REDIRECT_URI.into()],
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: HttpState,
    pub clock: Arc<ManualClock>,
    pub cache: Arc<TtlCache>,
    pub discovery: Arc<StaticClientDiscovery>,
    pub profile_repo: Arc<dyn ProfileRepository>,
}

pub async fn test_app() -> TestApp {
    test_app_with(
        Arc::new(InMemoryProfileRepository::new()),
        Arc::new(PlainPasswordHasher),
    )
    .await
}

pub async fn test_app_with(
    profile_repo: Arc<dyn ProfileRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
) -> TestApp {
    let clock = Arc::new(ManualClock::new());
    let cache = Arc::new(TtlCache::new());
    let discovery = Arc::new(StaticClientDiscovery::with_client(example_client()));
    let session_tokens: Arc<dyn SessionTokenManager> = Arc::new(JwtSessionTokenManager::new(
        ISSUER,
        JWT_SECRET,
        Duration::from_secs(3600),
    ));
    let code_generator: Arc<dyn CodeGenerator> = Arc::new(SequentialCodeGenerator::default());

    let services = Arc::new(ApplicationServices::new(
        Arc::clone(&profile_repo),
        Arc::clone(&cache) as Arc<dyn ExpiringStore>,
        Arc::clone(&discovery) as Arc<dyn ClientDiscovery>,
        password_hasher,
        session_tokens,
        code_generator,
        Arc::clone(&clock) as Arc<dyn Clock>,
        AuthorizationEndpoints {
            issuer: ISSUER.into(),
            authorization_path: AUTHORIZATION_PATH.into(),
        },
    ));

    let initialised = profile_repo.is_initialised().await.expect("initialised");
    let state = HttpState::new(
        services,
        HttpSettings {
            issuer: ISSUER.into(),
            domain: DOMAIN.into(),
            cookie_name: COOKIE_NAME.into(),
        },
        initialised,
    );

    TestApp {
        router: build_router_with_rate_limiter(state.clone(), false),
        state,
        clock,
        cache,
        discovery,
        profile_repo,
    }
}

/// A set-up app and a session cookie for the owner.
pub async fn ready_app() -> (TestApp, String) {
    let app = test_app().await;
    app.setup_profile().await;
    let cookie = app.login().await;
    (app, cookie)
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn setup_profile(&self) {
        let response = self
            .send(post_form(
                "/setup",
                &[
                    ("profile_id", PROFILE_ID),
                    ("password", PASSWORD),
                    ("confirmed_password", PASSWORD),
                    ("display_name", "Owner"),
                    ("url", "https://owner.example/"),
                    ("photo_url", "https://owner.example/photo.jpg"),
                    ("email", "owner@owner.example"),
                ],
                None,
            ))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "setup failed");
    }

    /// Log in as the owner and return the `name=value` cookie pair.
    pub async fn login(&self) -> String {
        let response = self
            .send(post_form(
                "/profile/login",
                &[
                    ("profile_id", PROFILE_ID),
                    ("password", PASSWORD),
                    ("login_type", "profile"),
                ],
                None,
            ))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "login failed");
        session_cookie(&response)
    }

    /// Open an authorization request as the logged-in owner and return the
    /// encoded state from the consent document.
    pub async fn review(&self, cookie: &str, scope: &str) -> String {
        let response = self
            .send(get(&authorize_uri(CLIENT_STATE, scope), Some(cookie)))
            .await;
        assert_eq!(response.status(), StatusCode::OK, "consent failed");
        let consent = body_json(response).await;
        consent["state"].as_str().expect("state").to_owned()
    }

    /// Run the owner side of the flow and return the issued code.
    pub async fn authorization_code(&self, cookie: &str, scope: &str) -> String {
        let state = self.review(cookie, scope).await;
        let response = self
            .send(post_form(
                &format!("{AUTHORIZATION_PATH}/accept"),
                &[("state", &state)],
                Some(cookie),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "accept failed");
        query_value(&location(&response), "code").expect("code")
    }
}

pub fn authorize_uri(state: &str, scope: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("response_type", "code")
        .append_pair("client_id", CLIENT_ID)
        .append_pair("redirect_uri", REDIRECT_URI)
        .append_pair("state", state)
        .append_pair("code_challenge", CODE_CHALLENGE)
        .append_pair("code_challenge_method", "S256")
        .append_pair("scope", scope)
        .append_pair("me", PROFILE_ID)
        .finish();
    format!("{AUTHORIZATION_PATH}?{query}")
}

pub fn exchange_form(code: &str) -> Vec<(&'static str, String)> {
    vec![
        ("grant_type", "authorization_code".into()),
        ("code", code.into()),
        ("client_id", CLIENT_ID.into()),
        ("redirect_uri", REDIRECT_URI.into()),
        ("code_verifier", CODE_VERIFIER.into()),
    ]
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form<K: AsRef<str>, V: AsRef<str>>(
    uri: &str,
    pairs: &[(K, V)],
    cookie: Option<&str>,
) -> Request<Body> {
    let body = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
        .finish();

    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("location header")
        .to_owned()
}

/// Look up a query parameter of a relative or absolute URL.
pub fn query_value(location: &str, key: &str) -> Option<String> {
    let base = Url::parse(ISSUER).unwrap();
    let url = base.join(location).expect("valid location");
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// The `name=value` part of the response's session cookie.
pub fn session_cookie(response: &Response) -> String {
    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("set-cookie header");
    raw.split(';').next().unwrap_or_default().trim().to_owned()
}

/// Assert that a response is an error JSON with the expected status and error string.
pub async fn assert_error_response(response: Response, expected_status: StatusCode) -> String {
    assert_eq!(response.status(), expected_status);
    let expected_error = expected_status.canonical_reason().unwrap_or("error");
    let json = body_json(response).await;
    assert_eq!(json["error"].as_str(), Some(expected_error));
    let message = json["message"].as_str().unwrap_or_default().to_owned();
    assert!(!message.is_empty(), "expected a non-empty message");
    message
}
