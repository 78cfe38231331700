use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::{Result, StudioError};
use crate::models::generation::{
    ErrorBody, GeneratedImage, GenerateImageRequest, GenerateImageResponse, GenerationForm,
};
use crate::validator;

pub const GENERIC_FAILURE: &str = "Something went wrong";
pub const WEBP_DATA_URI_PREFIX: &str = "data:image/webp;base64,";

/// UI state as one tagged variant, so stale combinations (loading with a
/// leftover error, error alongside an image) are unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Loading,
    Success(GeneratedImage),
    Failed(String),
}

/// The generate endpoint as the controller sees it: one call, one result.
/// The HTTP implementation talks to `/api/generate-image`; tests substitute
/// their own.
#[async_trait]
pub trait GenerateEndpoint: Send + Sync {
    async fn generate(&self, request: GenerateImageRequest) -> Result<GenerateImageResponse>;
}

/// `GenerateEndpoint` over HTTP, mirroring what a browser client does.
pub struct HttpGenerateEndpoint {
    client: reqwest::Client,
    url: String,
}

impl HttpGenerateEndpoint {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl GenerateEndpoint for HttpGenerateEndpoint {
    async fn generate(&self, request: GenerateImageRequest) -> Result<GenerateImageResponse> {
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| StudioError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => "Failed to generate image".to_string(),
            };
            return Err(StudioError::BackendError(message));
        }

        response
            .json()
            .await
            .map_err(|e| StudioError::ResponseError(e.to_string()))
    }
}

/// Client-side orchestrator: owns the UI state, submits requests through
/// the injected endpoint, and exposes the result for rendering and export.
pub struct GenerationController {
    endpoint: Arc<dyn GenerateEndpoint>,
    state: Mutex<UiState>,
}

impl GenerationController {
    pub fn new(endpoint: Arc<dyn GenerateEndpoint>) -> Self {
        Self {
            endpoint,
            state: Mutex::new(UiState::Idle),
        }
    }

    pub fn state(&self) -> UiState {
        self.state.lock().unwrap().clone()
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.state.lock().unwrap(), UiState::Loading)
    }

    /// Current result, if the last submission succeeded.
    pub fn image(&self) -> Option<GeneratedImage> {
        match &*self.state.lock().unwrap() {
            UiState::Success(image) => Some(image.clone()),
            _ => None,
        }
    }

    /// Submits the form. A submit while a request is in flight is a no-op;
    /// the controller holds at most one outstanding request.
    pub async fn submit(&self, form: GenerationForm) -> UiState {
        let request = {
            let mut state = self.state.lock().unwrap();
            if *state == UiState::Loading {
                log::debug!("Submit ignored: a generation is already in flight");
                return state.clone();
            }

            // Validation failures surface immediately, before any network
            // call is issued.
            match validator::validate(&form) {
                Ok(request) => {
                    *state = UiState::Loading;
                    request
                }
                Err(e) => {
                    let message = e.to_string();
                    log::warn!("Submission rejected: {}", message);
                    *state = UiState::Failed(message.clone());
                    return UiState::Failed(message);
                }
            }
        };

        let api_request = GenerateImageRequest {
            prompt: request.prompt,
            model: request.model,
            width: Some(request.width),
            height: Some(request.height),
        };

        let next = match self.endpoint.generate(api_request).await {
            Ok(response) => {
                log::info!("Image generated successfully");
                UiState::Success(GeneratedImage {
                    data_uri: format!("{}{}", WEBP_DATA_URI_PREFIX, response.image_data),
                    revised_prompt: response.revised_prompt,
                })
            }
            Err(e) => {
                let message = display_message(&e);
                log::error!("Error generating image: {}", message);
                UiState::Failed(message)
            }
        };

        let mut state = self.state.lock().unwrap();
        *state = next.clone();
        next
    }
}

/// What the user sees for a failure. Backend and validation messages pass
/// through; transport and decoding failures collapse to a fixed fallback.
fn display_message(error: &StudioError) -> String {
    match error {
        StudioError::BackendError(message) | StudioError::ValidationError(message) => {
            message.clone()
        }
        _ => GENERIC_FAILURE.to_string(),
    }
}
