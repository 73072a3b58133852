use dotenvy::dotenv;
use giftcard_service::config::get_configuration;
use giftcard_service::services::init_metrics;
use giftcard_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let settings = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "giftcard-service",
        &settings.observability.log_level,
        settings.observability.otlp_endpoint.as_deref(),
    )?;

    init_metrics()?;

    let application = Application::build(settings).await?;
    application.run_until_stopped().await?;

    Ok(())
}
