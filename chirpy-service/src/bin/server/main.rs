use std::sync::Arc;

use auth::Authenticator;
use chirpy_service::config::Config;
use chirpy_service::domain::session::store::run_purge_loop;
use chirpy_service::inbound::http::router::create_router;
use chirpy_service::repositories::PostgresChirpRepository;
use chirpy_service::repositories::PostgresRefreshTokenRepository;
use chirpy_service::repositories::PostgresUserRepository;
use chirpy_service::AuthService;
use chirpy_service::ChirpService;
use chirpy_service::RefreshTokenStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "chirpy-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        platform = ?config.platform,
        access_ttl_seconds = config.tokens.access_ttl().num_seconds(),
        refresh_ttl_days = config.tokens.refresh_ttl().num_days(),
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.tokens.secret.as_bytes(),
        config.tokens.access_ttl(),
    ));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let refresh_token_repository = Arc::new(PostgresRefreshTokenRepository::new(pg_pool.clone()));
    let chirp_repository = Arc::new(PostgresChirpRepository::new(pg_pool));

    let refresh_tokens = Arc::new(RefreshTokenStore::new(
        refresh_token_repository,
        config.tokens.refresh_ttl(),
    ));

    if let Some(interval_secs) = config.tokens.purge_interval_seconds.filter(|s| *s > 0) {
        tokio::spawn(run_purge_loop(Arc::clone(&refresh_tokens), interval_secs));
        tracing::info!(interval_secs, "Refresh token purge scheduled");
    }

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        refresh_tokens,
        authenticator,
    ));
    let chirp_service = Arc::new(ChirpService::new(chirp_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, chirp_service, config.platform);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");
    Ok(())
}
