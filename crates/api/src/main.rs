use std::sync::Arc;

use anyhow::Context;

use stockcast_api::config::ServiceConfig;
use stockcast_forecast::ForecastService;
use stockcast_model::TreeEnsemble;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockcast_observability::init();

    let config = ServiceConfig::from_env().context("invalid configuration")?;

    // Loaded once; a missing or corrupt artifact aborts startup.
    let model = TreeEnsemble::load(&config.model_path)
        .with_context(|| format!("failed to load model from {}", config.model_path.display()))?;
    let service = ForecastService::new(Arc::new(model));

    let app = stockcast_api::app::build_app(service, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
