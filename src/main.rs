use anyhow::Context;
use loriens_guide::api::{build_router, AppState};
use loriens_guide::cameras::CameraDirectory;
use loriens_guide::config::AppConfig;
use loriens_guide::guidance::GuidanceService;
use loriens_guide::vlm::{AssetChatClient, VlmConfig};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let app_config = AppConfig::default().from_env();
    let vlm_config = VlmConfig::default().from_env();

    if !vlm_config.has_credentials() {
        warn!("VLM credentials not configured; analysis requests will degrade to safe errors");
    }

    let directory = Arc::new(CameraDirectory::load(&app_config.cameras_file));
    if directory.is_empty() {
        warn!("Camera directory is empty; guidance queries will report no cameras");
    }

    let backend = Arc::new(AssetChatClient::new(vlm_config).context("building VLM client")?);
    let service = Arc::new(GuidanceService::new(directory, backend));

    let router = build_router(AppState { service }, app_config.max_body_bytes);

    let addr = app_config.bind_addr();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, router).await?;

    Ok(())
}
