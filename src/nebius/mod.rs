pub mod image_client;

pub use image_client::{ImageClient, ImageGenerator};

use crate::{
    config::NebiusConfig,
    error::{Result, StudioError},
};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.studio.nebius.com/v1";

/// Outbound calls get a hard deadline so a stuck backend cannot pin a
/// request forever.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Handle to the Nebius AI Studio API. Explicitly constructed and injected
/// wherever a backend is needed; there is no process-wide singleton.
#[derive(Clone, Debug)]
pub struct NebiusClient {
    image_client: ImageClient,
}

impl NebiusClient {
    pub fn new(config: NebiusConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .ok_or_else(|| StudioError::ConfigError("Nebius API key is required".into()))?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StudioError::ConfigError(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            image_client: ImageClient::new(http, base_url, api_key),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
