use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use lumen_relay::application::ports::{GenerationRequest, GenerativeModel};
use lumen_relay::application::services::WorkerPool;
use lumen_relay::infrastructure::llm::GeminiClient;
use lumen_relay::infrastructure::observability::{TracingConfig, init_tracing};
use lumen_relay::presentation::{AppState, ConfigurationError, Environment, Settings, create_router};

const CONNECTION_TEST_PROMPT: &str = "Test connection";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(ConfigurationError::InvalidEnvironment)?;
    let settings = Settings::load(environment)?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        Some(&settings.logging.level),
        settings.logging.json,
    ));

    settings.validate()?;

    tokio::fs::create_dir_all(&settings.upload.staging_dir)
        .await
        .with_context(|| {
            format!(
                "failed to create staging directory {}",
                settings.upload.staging_dir.display()
            )
        })?;

    let model = Arc::new(GeminiClient::from_settings(&settings.model)?);
    tracing::info!(model = %model.model(), "Model client configured");

    if settings.model.verify_on_startup {
        verify_connection(model.as_ref()).await?;
    }

    let pool = WorkerPool::new(settings.worker_pool.size);
    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server.host / server.port")?;

    let state = AppState::new(settings, model, pool.clone());
    let router = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.drain().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn verify_connection<M: GenerativeModel>(model: &M) -> Result<(), ConfigurationError> {
    model
        .generate(&GenerationRequest::text(CONNECTION_TEST_PROMPT))
        .await
        .map(|_| tracing::info!("Model connection verified"))
        .map_err(|e| ConfigurationError::ConnectionTest(e.to_string()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
