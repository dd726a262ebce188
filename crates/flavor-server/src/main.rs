//! Flavor bridge HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use flavor::catalog::Catalog;
use flavor::config::Config;
use flavor::embedding::{Embedder, HttpEmbedder, StubEmbedder};
use flavor::generation::{CannedGenerator, GenaiGenerator, TextGenerator};
use flavor::kv::MemoryKvStore;
use flavor::seed::IndexSeeder;
use flavor::vectordb::{QdrantIndex, SimilarityIndex};
use flavor_server::gateway::{AppState, StateSettings, create_router_with_state};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_PORT: u16 = 8787;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "flavor bridge starting"
    );

    let catalog = Arc::new(match &config.catalog_path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin()?,
    });
    tracing::info!(ingredients = catalog.len(), "catalog loaded");

    let embedder: Arc<dyn Embedder> = match config.embedder_config() {
        Some(embedder_config) => Arc::new(HttpEmbedder::new(embedder_config)?),
        None => {
            tracing::warn!(
                "No FLAVOR_EMBEDDING_URL configured, running embedder in stub mode"
            );
            Arc::new(StubEmbedder::with_dim(config.embedding_dim))
        }
    };

    let index: Arc<dyn SimilarityIndex> =
        Arc::new(QdrantIndex::new(&config.qdrant_url, config.collection.clone())?);

    if std::env::args().any(|arg| arg == "--seed") {
        let seeder = IndexSeeder::new(catalog, embedder, index);
        let seeded = seeder.seed_all().await?;
        tracing::info!(seeded, "seed run finished");
        return Ok(());
    }

    if let Err(e) = index.ensure_collection(embedder.embedding_dim() as u64).await {
        tracing::warn!(error = %e, "could not ensure collection, continuing");
    }

    let generator: Arc<dyn TextGenerator> = if config.mock_provider {
        tracing::warn!("FLAVOR_MOCK_PROVIDER set, serving canned explanations");
        Arc::new(CannedGenerator::new())
    } else {
        Arc::new(GenaiGenerator::new(config.llm_model.clone()))
    };

    let store = Arc::new(MemoryKvStore::with_capacity(config.kv_capacity));

    let state = AppState::new(
        catalog,
        embedder,
        index,
        generator,
        store,
        StateSettings::from(&config),
    );

    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("flavor bridge shutdown complete");
    Ok(())
}

async fn run_health_check() -> i32 {
    let port = std::env::var("FLAVOR_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    let url = format!("http://127.0.0.1:{}/health", port);

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    {
        Ok(client) => client,
        Err(_) => return 1,
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
