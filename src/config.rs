use std::env;

#[derive(Debug, Clone)]
pub struct NebiusConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for NebiusConfig {
    fn default() -> Self {
        NebiusConfig {
            base_url: None,
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl NebiusConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let base_url = env::var("NEBIUS_BASE_URL").ok();
        let api_key = env::var("NEBIUS_API_KEY").ok();
        let timeout_secs = env::var("NEBIUS_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());

        NebiusConfig {
            base_url,
            api_key,
            timeout_secs,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: Option<u16>,
    pub nebius: Option<NebiusConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: None,
            nebius: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());

        Config { port, nebius: None }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_nebius(mut self, config: NebiusConfig) -> Self {
        self.nebius = Some(config);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let config = Config::new()
            .with_port(3000)
            .with_nebius(NebiusConfig::new().with_api_key("test-key"));

        assert_eq!(config.port, Some(3000));
        let nebius = config.nebius.expect("nebius config set");
        assert_eq!(nebius.api_key.as_deref(), Some("test-key"));
        assert_eq!(nebius.base_url, None);
    }

    #[test]
    fn test_timeout_builder() {
        let nebius = NebiusConfig::new().with_timeout_secs(30);
        assert_eq!(nebius.timeout_secs, Some(30));
    }
}
