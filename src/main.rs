use std::sync::Arc;

use aq_predictor::{app, config::Config, features, model::ModelSet, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    // Fail fast: no listener until all three artifacts load and pass a
    // warmup forward.
    let models = ModelSet::load(&config.model_dir)?;
    tracing::info!(
        "models loaded; feature order[{}]: {:?}",
        features::FEATURE_DIM,
        features::FEATURE_NAMES
    );

    let state = AppState {
        models: Arc::new(models),
    };

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
