use std::fmt;

#[derive(Debug)]
pub enum StudioError {
    ConfigError(String),
    ValidationError(String),
    RequestError(String),
    BackendError(String),
    ResponseError(String),
    InternalError(String),
    EmptyResponse,
}

impl fmt::Display for StudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudioError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            // Validation and backend messages are shown to users verbatim.
            StudioError::ValidationError(msg) => write!(f, "{}", msg),
            StudioError::RequestError(msg) => write!(f, "Request error: {}", msg),
            StudioError::BackendError(msg) => write!(f, "{}", msg),
            StudioError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            StudioError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            StudioError::EmptyResponse => write!(f, "No images generated"),
        }
    }
}

impl std::error::Error for StudioError {}

pub type Result<T> = std::result::Result<T, StudioError>;
