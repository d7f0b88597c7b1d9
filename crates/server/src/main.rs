use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postino_core::config::{load_config, validate_config, Config};
use postino_core::dispatch::TopicDispatcher;
use postino_core::generator::{OpenAiGenerator, SlideGenerator};
use postino_core::pipeline::PostPipeline;
use postino_core::publisher::{GraphApiPublisher, Publisher};
use postino_core::renderer::{CommandRenderer, SlideRenderer};
use postino_core::sourcing::{HttpImageSourcer, ImageSourcer};
use postino_core::topic::{SqliteTopicStore, TopicStore};

use postino_server::api::create_router;
use postino_server::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("POSTINO_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Database path: {:?}", config.database.path);

    // Compute config hash for startup logging
    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!(
        "Starting postino {} (config hash {})",
        VERSION,
        &config_hash[..16]
    );

    // Create SQLite topic store
    let store: Arc<dyn TopicStore> = Arc::new(
        SqliteTopicStore::new(&config.database.path).context("Failed to create topic store")?,
    );
    info!("Topic store initialized");

    // Create publisher if configured; the carousel endpoint only needs
    // this one collaborator
    let publisher: Option<Arc<dyn Publisher>> = config.publisher.as_ref().map(|p| {
        info!("Initializing publisher for business {}", p.business_id);
        Arc::new(GraphApiPublisher::new(p.clone())) as Arc<dyn Publisher>
    });

    // Create dispatcher if every collaborator is configured
    let dispatcher = build_dispatcher(&config, Arc::clone(&store), publisher.clone());

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), store, publisher, dispatcher));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");

    Ok(())
}

/// Wire the pipeline and dispatcher from the optional collaborator
/// sections. All four are required; with any missing the service still
/// serves the queue API but cannot schedule runs.
fn build_dispatcher(
    config: &Config,
    store: Arc<dyn TopicStore>,
    publisher: Option<Arc<dyn Publisher>>,
) -> Option<Arc<TopicDispatcher>> {
    let (generator_cfg, renderer_cfg, sourcing_cfg, publisher) = match (
        &config.generator,
        &config.renderer,
        &config.sourcing,
        publisher,
    ) {
        (Some(g), Some(r), Some(s), Some(p)) => (g, r, s, p),
        (g, r, s, p) => {
            info!(
                "Dispatcher disabled, missing collaborator config (generator: {}, renderer: {}, sourcing: {}, publisher: {})",
                g.is_some(),
                r.is_some(),
                s.is_some(),
                p.is_some()
            );
            return None;
        }
    };

    info!(
        "Initializing pipeline (model {}, renderer {:?})",
        generator_cfg.model, renderer_cfg.command
    );

    let generator: Arc<dyn SlideGenerator> = Arc::new(OpenAiGenerator::new(generator_cfg.clone()));
    let renderer: Arc<dyn SlideRenderer> = Arc::new(CommandRenderer::new(renderer_cfg.clone()));
    let sourcer: Arc<dyn ImageSourcer> = Arc::new(HttpImageSourcer::new(sourcing_cfg.clone()));

    let pipeline = Arc::new(PostPipeline::new(
        generator,
        renderer,
        sourcer,
        publisher,
        config.pipeline.clone(),
    ));

    info!(
        "Dispatcher initialized (pool size {})",
        config.dispatcher.pool_size
    );
    Some(Arc::new(TopicDispatcher::new(
        store,
        pipeline,
        config.dispatcher.clone(),
    )))
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
