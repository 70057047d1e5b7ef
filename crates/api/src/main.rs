use std::sync::Arc;

use anyhow::Context;

use surgishop_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    surgishop_observability::init(config.log_format);

    let services = surgishop_api::app::services::AppServices::from_config(&config)?;
    let app = surgishop_api::app::build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        expiry_policy = config.expiry_policies.default_policy().as_str(),
        "listening"
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
