use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::error::{Result, StudioError};
use crate::models::generation::GeneratedImage;

pub const DOWNLOAD_PREFIX: &str = "ai-image";
pub const SHARE_FALLBACK_TEXT: &str = "Check out this AI generated image!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Webp,
    Png,
    Jpg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Webp => "webp",
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Webp => "image/webp",
            ExportFormat::Png => "image/png",
            ExportFormat::Jpg => "image/jpeg",
        }
    }
}

/// System clipboard as the core needs it. The host shell provides the
/// platform implementation.
pub trait Clipboard {
    fn write_image(&self, bytes: &[u8], mime_type: &str) -> std::result::Result<(), String>;
    fn write_text(&self, text: &str) -> std::result::Result<(), String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    /// The user dismissed the sheet. Not a failure.
    Cancelled,
}

/// Native share sheet as the core needs it.
pub trait ShareSheet {
    fn share(
        &self,
        file_name: &str,
        bytes: &[u8],
        text: &str,
    ) -> std::result::Result<ShareOutcome, String>;
}

/// Extracts the binary payload from a base64 data URI.
pub fn decode_data_uri(data_uri: &str) -> Result<Vec<u8>> {
    let payload = data_uri
        .split_once("base64,")
        .map(|(_, payload)| payload)
        .ok_or_else(|| StudioError::ResponseError("Not a base64 data URI".into()))?;

    BASE64
        .decode(payload)
        .map_err(|e| StudioError::ResponseError(format!("Failed to decode image: {}", e)))
}

/// Saves the image under `dir` as `ai-image-{timestamp}.{ext}`. The stored
/// payload is webp; png and jpg exports go through a real re-encode.
pub fn download(image: &GeneratedImage, format: ExportFormat, dir: &Path) -> Result<PathBuf> {
    let bytes = decode_data_uri(&image.data_uri)?;
    let bytes = transcode(bytes, format)?;

    let filename = format!(
        "{}-{}.{}",
        DOWNLOAD_PREFIX,
        chrono::Utc::now().timestamp_millis(),
        format.extension()
    );
    let path = dir.join(filename);

    fs::write(&path, &bytes)
        .map_err(|e| StudioError::InternalError(format!("Failed to save image: {}", e)))?;

    log::info!("Image downloaded as {}", format.extension().to_uppercase());
    Ok(path)
}

fn transcode(bytes: Vec<u8>, format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Webp => Ok(bytes),
        ExportFormat::Png => encode(image::load_from_memory(&bytes), image::ImageFormat::Png),
        ExportFormat::Jpg => {
            // JPEG has no alpha channel.
            let decoded = image::load_from_memory(&bytes)
                .map(|img| image::DynamicImage::ImageRgb8(img.to_rgb8()));
            encode(decoded, image::ImageFormat::Jpeg)
        }
    }
}

fn encode(
    decoded: std::result::Result<image::DynamicImage, image::ImageError>,
    target: image::ImageFormat,
) -> Result<Vec<u8>> {
    let decoded = decoded
        .map_err(|e| StudioError::InternalError(format!("Failed to decode image: {}", e)))?;

    let mut out = Cursor::new(Vec::new());
    decoded
        .write_to(&mut out, target)
        .map_err(|e| StudioError::InternalError(format!("Failed to encode image: {}", e)))?;
    Ok(out.into_inner())
}

/// Copies the image to the clipboard. Failures are logged, never raised.
pub fn copy_to_clipboard(clipboard: &dyn Clipboard, image: &GeneratedImage) {
    let bytes = match decode_data_uri(&image.data_uri) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("Copy failed: {}", e);
            return;
        }
    };

    match clipboard.write_image(&bytes, ExportFormat::Webp.mime_type()) {
        Ok(()) => log::info!("Image copied to clipboard"),
        Err(e) => log::error!("Copy failed: {}", e),
    }
}

/// Opens the native share sheet with the image attached and the revised
/// prompt as share text. User cancellation is not an error.
pub fn share(sheet: &dyn ShareSheet, image: &GeneratedImage) {
    let text = if image.revised_prompt.is_empty() {
        SHARE_FALLBACK_TEXT
    } else {
        image.revised_prompt.as_str()
    };

    let bytes = match decode_data_uri(&image.data_uri) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("Share failed: {}", e);
            return;
        }
    };

    match sheet.share("ai-image.webp", &bytes, text) {
        Ok(ShareOutcome::Shared) => log::info!("Share dialog opened successfully"),
        Ok(ShareOutcome::Cancelled) => {}
        Err(e) => log::error!("Share failed: {}", e),
    }
}

/// Copies the revised prompt text. No-op when there is nothing to copy.
pub fn copy_prompt_text(clipboard: &dyn Clipboard, revised_prompt: &str) {
    if revised_prompt.is_empty() {
        return;
    }

    match clipboard.write_text(revised_prompt) {
        Ok(()) => log::info!("Prompt copied to clipboard"),
        Err(e) => log::error!("Copy failed: {}", e),
    }
}
