use anyhow::Result;
use cep_weather::{AppConfig, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    let _telemetry = telemetry::init(&config)?;

    tracing::info!("Starting cep-weather {} on port {}", cep_weather::VERSION, config.port);
    web::run(config).await
}
