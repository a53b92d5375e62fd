use anyhow::Context;
use crop_yield::{config::ServiceConfig, http, PredictionService};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cfg = ServiceConfig::from_env();
    tracing::info!("loading model artifacts from {}", cfg.model_dir.display());

    // Blocking load before the listener opens; a missing model is not fatal.
    let svc = PredictionService::load(&cfg.model_dir).with_feature_logging(cfg.log_features);
    if !svc.is_loaded() {
        tracing::warn!("model not loaded; /predict will answer 503 until restarted with artifacts");
    }

    let app = http::router(svc);

    let (host, port) = cfg.listen_addr();
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
