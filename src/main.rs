// sentinel - error-tracking integration service
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use sentinel::cli::Args;
use sentinel::config::AppConfig;
use sentinel::server::{create_router, AppState};
use sentinel::store::MockErrorStore;
use sentinel::telemetry::{ClientOptions, Level, LogTransport, TelemetryClient, TelemetryLayer};
use sentinel::utils::logging;
use serde_json::{json, Map};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration, CLI flags take precedence
    let mut config = AppConfig::load_from(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    // Phase 2: Build the telemetry client and initialize logging
    let telemetry = TelemetryClient::new(
        ClientOptions::from_config(&config.telemetry),
        LogTransport,
    );
    let bridge = config
        .telemetry
        .capture_log_errors
        .then(|| TelemetryLayer::new(telemetry.clone()));
    logging::init(&config.logging, bridge)?;
    info!("Starting sentinel v{}", env!("CARGO_PKG_VERSION"));

    if telemetry.is_enabled() {
        let options = telemetry.options();
        info!(
            "Telemetry enabled (environment: {}, release: {})",
            options.environment.as_deref().unwrap_or("unset"),
            options.release.as_deref().unwrap_or("unset")
        );
    } else {
        warn!("No DSN configured, telemetry disabled");
    }

    // Phase 2.5: Handle --demo flag
    if args.demo {
        run_demo(&telemetry);
        return Ok(());
    }

    // Phase 3: Run the HTTP server on a runtime sized from config
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers)
        .enable_all()
        .build()?;

    runtime.block_on(serve(config, telemetry))
}

async fn serve(config: AppConfig, telemetry: TelemetryClient) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::new(config, telemetry, Arc::new(MockErrorStore::new()))?;
    let policy = state.retry.policy();
    info!(
        "Retry policy: {} attempts, initial delay {}ms",
        policy.max_attempts(),
        policy.initial_delay().as_millis()
    );
    let app = create_router(state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Capture a sample division-by-zero error with its operands as context.
fn run_demo(telemetry: &TelemetryClient) {
    let numerator: i64 = 10;
    let denominator: i64 = 0;

    if numerator.checked_div(denominator).is_some() {
        return;
    }

    let mut extra = Map::new();
    extra.insert("numerator".to_string(), json!(numerator));
    extra.insert("denominator".to_string(), json!(denominator));
    extra.insert("operation".to_string(), json!("division"));

    match telemetry.capture_custom_error("Division by zero encountered", Level::Error, extra) {
        Some(event_id) => println!("Error captured with ID: {}", event_id),
        None => println!("Error was not sent (telemetry disabled)"),
    }
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
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
