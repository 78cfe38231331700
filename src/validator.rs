use crate::error::{Result, StudioError};
use crate::models::catalog::DEFAULT_DIMENSION;
use crate::models::generation::{GenerationForm, GenerationRequest};

pub const PROMPT_REQUIRED: &str = "Prompt is required";

/// Validates and normalizes form input into a request. Rejection happens
/// here, before anything touches the network.
pub fn validate(form: &GenerationForm) -> Result<GenerationRequest> {
    let prompt = normalize_prompt(&form.prompt)?;

    let (width, height) = match form.size.as_deref() {
        Some(size) => parse_size(size)?,
        None => (DEFAULT_DIMENSION, DEFAULT_DIMENSION),
    };

    Ok(GenerationRequest {
        prompt,
        model: form.model,
        width,
        height,
    })
}

/// Shared prompt check: both the form validator and the server boundary go
/// through this, so the rejection message stays identical on both sides.
pub fn normalize_prompt(prompt: &str) -> Result<String> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(StudioError::ValidationError(PROMPT_REQUIRED.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Parses a "WIDTHxHEIGHT" token. Malformed or non-positive halves are
/// rejected rather than silently defaulted.
pub fn parse_size(size: &str) -> Result<(u32, u32)> {
    let invalid = || {
        StudioError::ValidationError(format!("Size must be WIDTHxHEIGHT, got '{}'", size.trim()))
    };

    let (w, h) = size.trim().split_once('x').ok_or_else(invalid)?;
    let width: u32 = w.trim().parse().map_err(|_| invalid())?;
    let height: u32 = h.trim().parse().map_err(|_| invalid())?;

    if width == 0 || height == 0 {
        return Err(invalid());
    }

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::ModelId;

    fn form(prompt: &str, size: Option<&str>) -> GenerationForm {
        GenerationForm {
            prompt: prompt.to_string(),
            model: ModelId::FluxSchnell,
            size: size.map(String::from),
        }
    }

    #[test]
    fn test_accepts_and_trims_prompt() {
        let request = validate(&form("  a red fox  ", Some("512x512"))).unwrap();
        assert_eq!(request.prompt, "a red fox");
        assert_eq!((request.width, request.height), (512, 512));
    }

    #[test]
    fn test_rejects_empty_prompt() {
        let err = validate(&form("", None)).unwrap_err();
        assert_eq!(err.to_string(), PROMPT_REQUIRED);
    }

    #[test]
    fn test_rejects_whitespace_prompt() {
        let err = validate(&form("   \t\n", None)).unwrap_err();
        assert_eq!(err.to_string(), PROMPT_REQUIRED);
    }

    #[test]
    fn test_missing_size_defaults() {
        let request = validate(&form("a red fox", None)).unwrap();
        assert_eq!((request.width, request.height), (1024, 1024));
    }

    #[test]
    fn test_parse_size_variants() {
        assert_eq!(parse_size("1024x1536").unwrap(), (1024, 1536));
        assert_eq!(parse_size(" 512 x 512 ").unwrap(), (512, 512));
        assert!(parse_size("1024").is_err());
        assert!(parse_size("widexhigh").is_err());
        assert!(parse_size("0x512").is_err());
        assert!(parse_size("512x-3").is_err());
    }

    #[test]
    fn test_malformed_size_is_a_validation_error() {
        let err = validate(&form("a red fox", Some("huge"))).unwrap_err();
        assert!(matches!(err, StudioError::ValidationError(_)));
    }
}
