use std::sync::Arc;

use pixelstudio::nebius::ImageGenerator;
use pixelstudio::{logger, server, Config, NebiusClient, NebiusConfig};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_with_config(logger::LoggerConfig::development())?;

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    let config = Config::from_env();
    let nebius_config = NebiusConfig::from_env();

    if nebius_config.api_key.is_none() {
        log::error!("❌ NEBIUS_API_KEY is not set; generation requests will not be possible");
    }

    let client = match NebiusClient::new(nebius_config) {
        Ok(client) => {
            log::info!("✅ Nebius client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize Nebius client: {}", e);
            return Err(e.into());
        }
    };

    let generator: Arc<dyn ImageGenerator> = Arc::new(client.image().clone());
    server::run(config, generator).await?;

    Ok(())
}
