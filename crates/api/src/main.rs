use std::net::SocketAddr;
use std::sync::Arc;

use boom_api::config::ServerConfig;
use boom_api::router::build_app_router;
use boom_api::state::AppState;
use boom_cloud::{CloudinaryConfig, CloudinaryStore};
use boom_db::DbPool;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "boom_api=debug,boom_cloud=debug,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    let pool = connect_database().await;

    let cloudinary = CloudinaryConfig::from_env();
    tracing::info!(cloud = %cloudinary.cloud_name, "Using Cloudinary media store");
    let media = CloudinaryStore::new(cloudinary).expect("Failed to build media store client");

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("HOST/PORT do not form a socket address");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media: Arc::new(media),
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Cannot bind {addr}: {e}"));
    tracing::info!(
        %addr,
        max_attachment_bytes = config.max_attachment_bytes,
        request_timeout_secs = config.request_timeout_secs,
        "Listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped");
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, verify, and migrate. Any failure aborts startup.
async fn connect_database() -> DbPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = boom_db::create_pool(&url)
        .await
        .expect("Failed to connect to database");
    boom_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    boom_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database ready");
    pool
}

/// Completes on Ctrl-C, or on SIGTERM where available.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown requested, draining connections");
}
