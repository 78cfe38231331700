use serde::{Deserialize, Serialize};

use crate::models::catalog::ModelId;

/// Raw form values as submitted by the UI, prior to validation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationForm {
    pub prompt: String,
    #[serde(default)]
    pub model: ModelId,
    /// Single "WIDTHxHEIGHT" token, e.g. "1024x1024".
    pub size: Option<String>,
}

impl Default for GenerationForm {
    fn default() -> Self {
        GenerationForm {
            prompt: String::new(),
            model: ModelId::default(),
            size: None,
        }
    }
}

/// Validated generation request. Invariants: prompt is non-empty after
/// trimming, width and height are positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: ModelId,
    pub width: u32,
    pub height: u32,
}

/// Normalized backend result. `revised_prompt` falls back to the submitted
/// prompt when the backend does not supply a revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub image_data: String, // Base64 encoded
    pub revised_prompt: String,
}

/// Client-facing view of a finished generation: a renderable data URI plus
/// the display string for the revised prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub data_uri: String,
    pub revised_prompt: String,
}

/// Body of `POST /api/generate-image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: String,
    pub model: ModelId,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// 200 body of `POST /api/generate-image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    pub image_data: String,
    pub revised_prompt: String,
}

/// 4xx/5xx body of the API surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Wire shape of the backend images endpoint.
#[derive(Debug, Deserialize)]
pub struct ImagesResponse {
    #[serde(default)]
    pub data: Vec<ImageEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageEntry {
    pub b64_json: Option<String>,
    pub revised_prompt: Option<String>,
}
