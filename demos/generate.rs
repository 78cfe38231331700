use pixelstudio::nebius::ImageGenerator;
use pixelstudio::{
    models::catalog, ExportFormat, GeneratedImage, GenerationForm, ModelId, NebiusClient,
    NebiusConfig,
};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    pixelstudio::logger::init()?;

    log::info!("🖼️  Available image generation models:");
    for model in catalog::supported_models() {
        log::info!("  {:?} - {} ({})", model.id, model.name, model.description);
    }

    let config = NebiusConfig::from_env();
    let client = NebiusClient::new(config)?;

    let form = GenerationForm {
        prompt: "A serene landscape with mountains and a lake at sunset, digital art style"
            .to_string(),
        model: ModelId::FluxSchnell,
        size: Some("512x512".to_string()),
    };

    let request = pixelstudio::validator::validate(&form)?;
    let result = client.image().generate(request).await?;

    log::info!(
        "📏 Image data length: {} characters",
        result.image_data.len()
    );
    log::info!("📝 Revised prompt: {}", result.revised_prompt);

    let image = GeneratedImage {
        data_uri: format!("data:image/webp;base64,{}", result.image_data),
        revised_prompt: result.revised_prompt,
    };

    let path = pixelstudio::export::download(&image, ExportFormat::Webp, Path::new("."))?;
    log::info!("💾 Image saved to: {}", path.display());

    Ok(())
}
