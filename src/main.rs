//! Moniker HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use moniker::config::Config;
use moniker::embedding::{EmbedderConfig, HttpEmbedder, TextEmbedder};
use moniker::gateway::{HandlerState, create_router_with_state};
use moniker::generator::GeneratorConfig;
use moniker::index::{FlatIndex, VectorIndex};
use moniker::recommend::{Recommender, RecommenderConfig};
use moniker::rerank::MmrConfig;
use moniker::resume::MemoryResumeStore;
use moniker::vocab::VocabStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        embedder_url = %config.embedder_url,
        "Moniker starting"
    );

    let embedder = Arc::new(HttpEmbedder::new(EmbedderConfig {
        base_url: config.embedder_url.clone(),
        dimension: config.vector_dimension,
        timeout: config.embedder_timeout,
        retries: config.embedder_retries,
    })?);

    if let Err(e) = embedder.health_check().await {
        tracing::warn!(error = %e, "Embedding service not reachable at startup");
    }

    // Vocabulary-load failure is fatal; the store is stable afterwards.
    let vocab = Arc::new(VocabStore::load(
        config.modifier_path.as_deref(),
        config.noun_path.as_deref(),
    )?);

    let index = Arc::new(FlatIndex::open(
        config.index_path.clone(),
        config.vector_dimension,
    )?);

    let resumes = Arc::new(MemoryResumeStore::new());

    let recommender_config = RecommenderConfig {
        k: config.recommend_k,
        top_similar: config.top_similar,
        fallback_candidates: config.fallback_candidates,
        generator: GeneratorConfig {
            k_modifiers: config.k_modifiers,
            k_nouns: config.k_nouns,
            ..Default::default()
        },
        mmr: MmrConfig::with_lambda(config.mmr_lambda),
    };

    let recommender = Arc::new(Recommender::new(
        embedder.clone(),
        vocab,
        index.clone(),
        resumes.clone(),
        recommender_config,
    ));

    let state = HandlerState::new(recommender, resumes, embedder, index.clone());
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Flush the index snapshot before exiting.
    if let Err(e) = index.close() {
        tracing::error!(error = %e, "Failed to persist index on shutdown");
    }

    tracing::info!("Moniker shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
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
