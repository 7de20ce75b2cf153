use sea_orm_migration::MigratorTrait;
use stagebook_db::AppState;
use stagebook_server::config::ServerConfig;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stagebook_server=info,stagebook_db=info,tower_http=info".into()),
        )
        .init();

    // Database connection
    let db_config = stagebook_db::DatabaseConfig::from_env();
    tracing::info!("connecting to database...");
    let db = stagebook_db::connect(&db_config)
        .await
        .expect("failed to connect to database");

    tracing::info!("running database migrations...");
    stagebook_migration::Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    tracing::info!("migrations complete");

    let config = ServerConfig::from_env();
    let addr = config
        .socket_addr()
        .expect("STAGEBOOK_HOST/STAGEBOOK_PORT do not form a socket address");
    let app = stagebook_server::router(Arc::new(AppState { db }), &config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    tracing::info!(%addr, "server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("failed to install signal handler");
        term.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
