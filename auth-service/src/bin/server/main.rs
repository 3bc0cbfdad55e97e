use std::sync::Arc;
use std::time::Duration;

use auth_service::config::Config;
use auth_service::domain::authentication::ports::AuthServicePort;
use auth_service::domain::authentication::service::AuthService;
use auth_service::domain::authentication::service::AuthSettings;
use auth_service::inbound::http::cookies::RefreshCookiePolicy;
use auth_service::inbound::http::router::create_router;
use auth_service::inbound::purge::TokenSweeper;
use auth_service::outbound::repositories::PostgresTokenStore;
use auth_service::outbound::repositories::PostgresUserStore;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tokio::sync::watch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        environment = %config.server.environment,
        issuer = %config.jwt.issuer,
        access_token_minutes = config.jwt.access_token_expiration_minutes,
        refresh_token_days = config.jwt.refresh_token_expiration_days,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_store = Arc::new(PostgresUserStore::new(pg_pool.clone()));
    let token_store = Arc::new(PostgresTokenStore::new(pg_pool.clone()));

    let auth_service: Arc<dyn AuthServicePort> = Arc::new(AuthService::new(
        user_store,
        token_store,
        AuthSettings::from(&config.jwt),
    )?);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = match config.tokens.purge_interval_secs {
        0 => {
            tracing::warn!("Expired refresh token sweeper disabled");
            None
        }
        secs => Some(
            TokenSweeper::new(Arc::clone(&auth_service), Duration::from_secs(secs))
                .spawn(shutdown_rx),
        ),
    };

    let http_application = create_router(
        auth_service,
        RefreshCookiePolicy::new(
            config.server.is_production(),
            config.jwt.refresh_token_lifetime(),
        ),
        config.server.request_timeout(),
    );

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Some(sweeper) = sweeper {
        if let Err(e) = sweeper.await {
            tracing::error!(error = %e, "Sweeper task failed");
        }
    }

    pg_pool.close().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl+C received, starting graceful shutdown"),
        _ = terminate => tracing::info!("SIGTERM received, starting graceful shutdown"),
    }
}
