//! Deskflow server binary.
//!
//! Wires the configured adapters into one turn engine and serves the chat
//! transport.

use std::sync::Arc;
use std::time::Duration;

use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use deskflow::adapters::ai::{AnthropicConfig, AnthropicModel};
use deskflow::adapters::http::{app_router, ChatAppState};
use deskflow::adapters::knowledge::{HttpKnowledgeRetriever, KnowledgeSearchConfig};
use deskflow::adapters::storage::{FileStateStore, InMemoryStateStore};
use deskflow::adapters::ticketing::{HttpTicketGateway, TicketServiceConfig};
use deskflow::application::{EngineConfig, TurnEngine, TurnProcessor};
use deskflow::config::{AppConfig, StateBackend};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(config.server.is_production());
    config.validate()?;

    let api_key = config
        .ai
        .anthropic_api_key
        .clone()
        .ok_or("anthropic API key missing after validation")?;

    let model = Arc::new(AnthropicModel::new(
        AnthropicConfig::new(api_key)
            .with_model(config.ai.model.clone())
            .with_timeout(config.ai.timeout())
            .with_default_max_tokens(config.ai.max_tokens),
    ));

    let retriever = Arc::new(HttpKnowledgeRetriever::new(
        KnowledgeSearchConfig::new(config.knowledge.base_url.clone())
            .with_timeout(config.knowledge.timeout()),
    ));

    let tickets = Arc::new(HttpTicketGateway::new(
        TicketServiceConfig::new(config.ticketing.base_url.clone())
            .with_timeout(config.ticketing.timeout()),
    ));

    let engine_config = EngineConfig {
        greeting_precheck: config.engine.greeting_precheck,
        retrieval_top_k: config.knowledge.top_k,
    };

    let engine: Arc<dyn TurnProcessor> = match config.engine.state_backend {
        StateBackend::Memory => Arc::new(TurnEngine::new(
            Arc::new(InMemoryStateStore::new()),
            Arc::clone(&model),
            Arc::clone(&retriever),
            Arc::clone(&tickets),
            engine_config.clone(),
        )),
        StateBackend::File => Arc::new(TurnEngine::new(
            Arc::new(FileStateStore::new(&config.engine.state_dir)),
            Arc::clone(&model),
            Arc::clone(&retriever),
            Arc::clone(&tickets),
            engine_config.clone(),
        )),
    };

    let router = app_router(ChatAppState::new(engine)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(TimeoutLayer::new(Duration::from_secs(60))),
    );

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, backend = ?config.engine.state_backend, "deskflow listening");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
