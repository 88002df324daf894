//! judgecore - Application Entry Point
//!
//! This is the main entry point for the judge server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware::from_fn, Router};
use bollard::Docker;
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use judgecore::{
    config::CONFIG, evaluation::EvaluationService, handlers, middleware::logging_middleware,
    sandbox::BollardSandbox, state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting judgecore server...");

    tracing::info!("Connecting to container backend...");
    let docker = Docker::connect_with_socket_defaults()?;
    let docker_info = docker.version().await?;
    tracing::info!(
        "Connected to container backend version: {}",
        docker_info.version.unwrap_or_default()
    );

    let backend: Arc<dyn judgecore::sandbox::SandboxBackend> = Arc::new(BollardSandbox::new(docker));

    tracing::info!("Launching sandbox...");
    let evaluation = Arc::new(EvaluationService::new(backend, &CONFIG).await?);
    tracing::info!("Sandbox ready");

    let state = AppState::new(evaluation.clone(), CONFIG.clone());

    let app = Router::new()
        .merge(handlers::routes())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(logging_middleware))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    let serve_result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    tracing::info!("Shutting down sandbox...");
    evaluation.shutdown().await;

    serve_result?;
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
}
