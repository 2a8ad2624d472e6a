use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use matty_server::{
    app,
    config::{self, StorageBackend},
    repository::{DocumentStore, MemoryStore, PostgresStore},
    service::MattyService,
};

#[tokio::main]
async fn main() {
    // Config
    let (cfg, source) = config::load_config().unwrap_or_else(|e| {
        eprintln!("failed to load config: {e}");
        std::process::exit(1);
    });

    // Log setup, RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    source.log();

    // Storage creation and migration
    let store: Arc<dyn DocumentStore> = match cfg.storage.backend {
        StorageBackend::Postgres => {
            let repo = PostgresStore::new(&cfg.storage.dsn)
                .await
                .unwrap_or_else(|e| {
                    tracing::error!("Failed to establish database connection: {e}");
                    panic!("failed to establish database connection: {e}");
                });

            repo.migrate().await.unwrap_or_else(|e| {
                tracing::error!("Failed to migrate database: {e}");
                panic!("failed to migrate database: {e}");
            });

            Arc::new(repo)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    // Service creation
    let service = Arc::new(MattyService::new(store, cfg.limits));
    let router = app::router(service);

    let addr = cfg.socket_addr().unwrap_or_else(|e| {
        tracing::error!("{e}");
        panic!("{e}");
    });
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("REST server starting, listening on {}", addr);

    axum::serve(listener, router)
        .await
        .expect("failed to start server");
}
