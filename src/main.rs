// src/main.rs
use anyhow::Result;
use clap::Parser;
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
    cli::{Cli, Command},
    config::AppConfig,
    domain::profile::ProfileRepository,
    infrastructure::{
        cache::TtlCache,
        database,
        discovery::HttpClientDiscovery,
        repositories::SqliteProfileRepository,
        security::{Argon2PasswordHasher, JwtSessionTokenManager},
        time::SystemClock,
        util::RandomCodeGenerator,
    },
    presentation::http::{
        routes::{AUTHORIZATION_PATH, build_router},
        state::{HttpSettings, HttpState},
    },
};
use std::{future::IntoFuture, net::SocketAddr, sync::Arc};
use tokio::{signal, sync::watch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Command::Serve => {
            if let Err(err) = serve().await {
                tracing::error!(error = %err, "fatal error");
                eprintln!("fatal error: {err}");
                std::process::exit(1);
            }
        }
    }
}

async fn serve() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let issuer = config.issuer();

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;
    let pool = Arc::new(pool);

    let profile_repo: Arc<dyn ProfileRepository> =
        Arc::new(SqliteProfileRepository::new(Arc::clone(&pool)));

    let cache = Arc::new(TtlCache::new());
    let sweeper = cache.spawn_sweeper(config.cache_sweep_interval());
    let store: Arc<dyn ExpiringStore> = cache;

    let discovery: Arc<dyn ClientDiscovery> =
        Arc::new(HttpClientDiscovery::new(&issuer, config.discovery_timeout())?);
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let session_tokens: Arc<dyn SessionTokenManager> = Arc::new(JwtSessionTokenManager::new(
        issuer.clone(),
        config.jwt_secret().as_bytes(),
        config.session_ttl(),
    ));
    let code_generator: Arc<dyn CodeGenerator> = Arc::new(RandomCodeGenerator);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let services = Arc::new(ApplicationServices::new(
        profile_repo,
        store,
        discovery,
        password_hasher,
        session_tokens,
        code_generator,
        clock,
        AuthorizationEndpoints {
            issuer: issuer.clone(),
            authorization_path: AUTHORIZATION_PATH.to_owned(),
        },
    ));

    let initialised = services.profile_queries.is_initialised().await?;
    if !initialised {
        tracing::info!("no profile found, setup is required");
    }

    let state = HttpState::new(
        services,
        HttpSettings {
            issuer,
            domain: config.domain().to_owned(),
            cookie_name: config.jwt_cookie_name().to_owned(),
        },
        initialised,
    );

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(domain = %config.domain(), "listening on {address}");

    let (signalled_tx, mut signalled_rx) = watch::channel(());
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        signalled_tx.send_replace(());
    })
    .into_future();

    let grace = config.graceful_shutdown_timeout();
    tokio::select! {
        result = server => result?,
        () = async {
            let _ = signalled_rx.changed().await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(timeout = ?grace, "connections still open after the shutdown timeout");
        }
    }

    sweeper.shutdown().await;
    pool.close().await;
    tracing::info!("server stopped");

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
