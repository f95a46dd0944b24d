use analysis_core::{env_or, AnalysisError};
use market_data::ProviderKind;
use std::net::SocketAddr;

/// Log line format selected by `LOG_FORMAT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// HTTP server settings derived from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub provider: ProviderKind,
    pub polygon_api_key: Option<String>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AnalysisError> {
        let provider: ProviderKind = env_or("MARKET_DATA_PROVIDER", "yahoo".to_string()).parse()?;
        let log_format = match env_or("LOG_FORMAT", "text".to_string()).to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            host: env_or("API_HOST", "0.0.0.0".to_string()),
            port: env_or("API_PORT", 5000u16),
            provider,
            polygon_api_key: std::env::var("POLYGON_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            log_format,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AnalysisError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AnalysisError::Config(format!("invalid bind address {}:{}: {}", self.host, self.port, e)))
    }
}
