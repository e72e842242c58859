//! CLI entrypoint for InfraFlow Mesh
//!
//! This is the main binary that wires together all layers using
//! dependency injection, then serves the HTTP surface until Ctrl+C.

use anyhow::{Context, Result, bail};
use clap::Parser;
use infraflow_application::{
    ConversationLogger, MissionLifecycleManager, NoConversationLogger, OrchestrationFacade,
    ReasoningGateway,
};
use infraflow_infrastructure::{
    ConfigLoader, FileConfig, FileLoggingConfig, JsonlConversationLogger, OpenAiReasoningGateway,
    build_registry,
};
use infraflow_presentation::Cli;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        if let Some(path) = &cli.config {
            println!("Explicit config: {}", path.display());
        }
        for line in ConfigLoader::describe_sources() {
            println!("{}", line);
        }
        return Ok(());
    }

    // Load configuration before logging so [logging] can shape the subscriber
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    let _log_guard = init_tracing(&cli, &config.logging);

    info!("Starting InfraFlow Mesh");

    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue);
    }
    let errors: Vec<_> = issues.iter().filter(|i| i.is_error()).collect();
    if !errors.is_empty() {
        for issue in &errors {
            error!("{}", issue);
        }
        bail!("Invalid configuration ({} error(s))", errors.len());
    }

    let facade = Arc::new(build_facade(&config)?);
    match facade.gateway_model() {
        Some(model) if facade.readiness().is_ready() => info!(model, "Engine ready"),
        _ => warn!("Engine is offline: missions will be rejected until restarted with a valid configuration"),
    }

    let bind = cli.bind.as_deref().unwrap_or(&config.server.bind);
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind to {}", bind))?;
    info!("Listening on {}", bind);

    let app = infraflow_presentation::router(Arc::clone(&facade));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    let cancelled = facade.shutdown();
    info!(cancelled, "InfraFlow Mesh shutting down");

    Ok(())
}

/// Assemble registry, gateway and lifecycle into the facade
fn build_facade(config: &FileConfig) -> Result<OrchestrationFacade> {
    // An invalid roster keeps the engine offline instead of stopping the process
    let registry = match build_registry(&config.agents) {
        Ok(registry) => {
            info!(agents = registry.len(), "Agent roster loaded");
            Some(Arc::new(registry))
        }
        Err(e) => {
            error!("Invalid agent roster: {}", e);
            None
        }
    };

    let engine_config = config.engine.to_engine_config();
    let gateway = OpenAiReasoningGateway::try_from_config(&config.gateway)
        .map(|g| Arc::new(g) as Arc<dyn ReasoningGateway>);

    let conversation_logger: Arc<dyn ConversationLogger> = config
        .logging
        .conversation_log
        .as_ref()
        .and_then(JsonlConversationLogger::open)
        .map(|logger| {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger) as Arc<dyn ConversationLogger>
        })
        .unwrap_or_else(|| Arc::new(NoConversationLogger));

    let lifecycle = MissionLifecycleManager::from_config(registry, &engine_config, gateway)?
        .with_conversation_logger(conversation_logger);

    Ok(OrchestrationFacade::new(
        lifecycle,
        config.server.engine_name.as_str(),
    ))
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins over `-v`. When `[logging].log_dir` is set, a daily
/// rolling file receives the same events; the returned guard flushes it.
fn init_tracing(cli: &Cli, logging: &FileLoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));

    let (file_layer, guard) = match &logging.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "infraflow.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .init();

    guard
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server simply runs until killed
        warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C signal");
}
