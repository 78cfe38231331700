use serde::{Deserialize, Serialize};

/// Width/height applied when the caller leaves a dimension unset or zero.
pub const DEFAULT_DIMENSION: u32 = 1024;

/// Generation models offered to users. Unknown identifiers on the wire
/// deserialize to `Sdxl`: anything unrecognized routes to the high-quality
/// pipeline rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelId {
    FluxSchnell,
    #[serde(other)]
    Sdxl,
}

impl Default for ModelId {
    fn default() -> Self {
        ModelId::FluxSchnell
    }
}

/// Full parameter set for one backend invocation. Constructed fresh per
/// request, never mutated, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelConfig {
    pub backend_model: &'static str,
    pub response_extension: &'static str,
    pub width: u32,
    pub height: u32,
    pub num_inference_steps: u32,
    pub negative_prompt: &'static str,
    /// -1 means unseeded: the backend picks a random seed.
    pub seed: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: ModelId,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SizeOption {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

struct ModelSpec {
    backend_model: &'static str,
    steps: u32,
    name: &'static str,
    description: &'static str,
}

// Adding a model is a data change here, not a control-flow change.
const MODEL_TABLE: &[(ModelId, ModelSpec)] = &[
    (
        ModelId::FluxSchnell,
        ModelSpec {
            backend_model: "black-forest-labs/flux-schnell",
            steps: 4,
            name: "Flux Schnell",
            description: "Fast generation with 4 inference steps",
        },
    ),
    (
        ModelId::Sdxl,
        ModelSpec {
            backend_model: "stability-ai/sdxl",
            steps: 30,
            name: "Stability SDXL",
            description: "High quality with 30 inference steps",
        },
    ),
];

const SIZE_OPTIONS: &[SizeOption] = &[
    SizeOption {
        value: "512x512",
        label: "512×512",
        description: "Small - Quick Generation",
    },
    SizeOption {
        value: "768x768",
        label: "768×768",
        description: "Medium",
    },
    SizeOption {
        value: "1024x1024",
        label: "1024×1024",
        description: "Large - Square",
    },
    SizeOption {
        value: "1024x1536",
        label: "1024×1536",
        description: "Large - Portrait",
    },
    SizeOption {
        value: "1536x1024",
        label: "1536×1024",
        description: "Large - Landscape",
    },
];

fn spec_for(model: ModelId) -> &'static ModelSpec {
    MODEL_TABLE
        .iter()
        .find(|(id, _)| *id == model)
        .map(|(_, spec)| spec)
        // Documented permissive default: anything not in the table gets the
        // high-quality configuration.
        .unwrap_or(&MODEL_TABLE[1].1)
}

/// Maps a model identifier to the full parameter set the backend expects.
/// Pure and total: width/height fall back to 1024 when unset or zero, the
/// response format is always webp, the negative prompt is always empty, and
/// the seed is always the unseeded sentinel.
pub fn resolve(model: ModelId, width: Option<u32>, height: Option<u32>) -> ModelConfig {
    let spec = spec_for(model);

    ModelConfig {
        backend_model: spec.backend_model,
        response_extension: "webp",
        width: width.filter(|w| *w > 0).unwrap_or(DEFAULT_DIMENSION),
        height: height.filter(|h| *h > 0).unwrap_or(DEFAULT_DIMENSION),
        num_inference_steps: spec.steps,
        negative_prompt: "",
        seed: -1,
    }
}

pub fn supported_models() -> Vec<ModelInfo> {
    MODEL_TABLE
        .iter()
        .map(|(id, spec)| ModelInfo {
            id: *id,
            name: spec.name,
            description: spec.description,
        })
        .collect()
}

pub fn size_options() -> &'static [SizeOption] {
    SIZE_OPTIONS
}
