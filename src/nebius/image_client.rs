use crate::{
    error::{Result, StudioError},
    models::catalog::resolve,
    models::generation::{GenerationRequest, GenerationResult, ImagesResponse},
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Seam between the request pipeline and the generation backend; the server
/// handler and the tests substitute their own implementations.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResult>;
}

#[derive(Clone, Debug)]
pub struct ImageClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ImageClient {
    pub fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request body for the images endpoint: resolved backend model, the
    /// prompt, a base64 response, and the model-specific extra parameters.
    fn build_payload(request: &GenerationRequest) -> serde_json::Value {
        let config = resolve(request.model, Some(request.width), Some(request.height));

        json!({
            "model": config.backend_model,
            "prompt": request.prompt,
            "response_format": "b64_json",
            "extra_body": {
                "response_extension": config.response_extension,
                "width": config.width,
                "height": config.height,
                "num_inference_steps": config.num_inference_steps,
                "negative_prompt": config.negative_prompt,
                "seed": config.seed,
            }
        })
    }

    /// Normalizes a backend response: the first entry carries the image,
    /// and a missing revision falls back to the submitted prompt.
    fn normalize_response(
        response: ImagesResponse,
        request: &GenerationRequest,
    ) -> Result<GenerationResult> {
        let first = match response.data.first() {
            Some(entry) => entry,
            None => return Err(StudioError::EmptyResponse),
        };

        let image_data = first
            .b64_json
            .clone()
            .ok_or_else(|| StudioError::ResponseError("No image payload in response".into()))?;

        let revised_prompt = first
            .revised_prompt
            .clone()
            .unwrap_or_else(|| request.prompt.clone());

        Ok(GenerationResult {
            image_data,
            revised_prompt,
        })
    }
}

#[async_trait]
impl ImageGenerator for ImageClient {
    /// Exactly one outbound call per invocation: no retries, no caching, no
    /// idempotency key.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResult> {
        let payload = Self::build_payload(&request);

        log::info!(
            "Generating image with model: {} ({}x{})",
            payload["model"].as_str().unwrap_or("unknown"),
            request.width,
            request.height
        );

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| StudioError::RequestError(format!("Nebius request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_backend_message(&body)
                .unwrap_or_else(|| "Failed to generate image".to_string());
            log::error!("Nebius API error {}: {}", status, message);
            return Err(StudioError::BackendError(message));
        }

        let images: ImagesResponse = response
            .json()
            .await
            .map_err(|e| StudioError::ResponseError(e.to_string()))?;

        Self::normalize_response(images, &request)
    }
}

/// Pulls a human-readable message out of a backend error body when one is
/// present; different deployments nest it differently.
fn extract_backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for path in ["/error/message", "/detail", "/message"] {
        if let Some(message) = value.pointer(path).and_then(|m| m.as_str()) {
            return Some(message.to_string());
        }
    }
    None
}
