//! stp-api: HTTP server for the Smart Textbook Platform backend

mod api;
mod auth;
mod config;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stp_core::{CompletionProvider, EmbeddingProvider, VectorStore};
use stp_llm::FallbackCompleter;
use stp_rag::{CohereEmbedder, QdrantStore, RagEngine, TextbookLoader};
use stp_skills::{PersonalizeAgent, QuizAgent, TranslateAgent};

use crate::api::AppState;
use crate::auth::GuestProfiles;
use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "stp-api")]
#[command(about = "Physical AI textbook assistant API", long_about = None)]
struct Cli {
    /// Address to bind, e.g. 127.0.0.1:8000
    #[arg(short, long)]
    bind: Option<String>,

    /// Directory of textbook markdown files
    #[arg(short, long)]
    docs_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    let bind = cli.bind.unwrap_or(config.bind_addr);
    let docs_dir = cli.docs_dir.unwrap_or(config.docs_dir);

    // Providers are constructed once and injected; handlers never read the
    // environment.
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(CohereEmbedder::from_env()?);
    let store: Arc<dyn VectorStore> = Arc::new(QdrantStore::from_env(embedder.dimension())?);
    let llm: Arc<dyn CompletionProvider> = Arc::new(FallbackCompleter::from_env()?);

    if let Err(e) = store.ensure_collection().await {
        warn!(
            "could not initialize the vector collection: {} (expected when Qdrant is not running)",
            e
        );
    }

    let state = AppState {
        engine: Arc::new(RagEngine::new(embedder.clone(), store.clone(), llm.clone())),
        loader: Arc::new(TextbookLoader::new(embedder, store.clone())),
        store,
        quiz: Arc::new(QuizAgent::new(llm.clone())),
        personalize: Arc::new(PersonalizeAgent::new(llm.clone())),
        translate: Arc::new(TranslateAgent::new(llm)),
        profiles: Arc::new(GuestProfiles),
        docs_dir,
    };

    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("textbook assistant API listening on {}", bind);
    axum::serve(listener, app).await?;

    Ok(())
}
