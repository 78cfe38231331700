pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod logger;
pub mod models;
pub mod nebius;
pub mod server;
pub mod validator;

pub use config::{Config, NebiusConfig};
pub use controller::{GenerateEndpoint, GenerationController, HttpGenerateEndpoint, UiState};
pub use error::{Result, StudioError};
pub use export::ExportFormat;
pub use models::catalog::{resolve, ModelConfig, ModelId};
pub use models::generation::{
    GeneratedImage, GenerationForm, GenerationRequest, GenerationResult,
};
pub use nebius::{ImageClient, ImageGenerator, NebiusClient};
