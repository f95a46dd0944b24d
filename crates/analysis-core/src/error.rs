use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Insufficient data: need at least {needed} price points, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Sentiment parse skipped for text #{index}")]
    SentimentParseSkipped { index: usize },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalysisError {
    /// Stable snake_case identifier used in the `errors[].type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::DataUnavailable(_) => "data_unavailable",
            AnalysisError::InsufficientData { .. } => "insufficient_data",
            AnalysisError::SentimentParseSkipped { .. } => "sentiment_parse_skipped",
            AnalysisError::InvalidData(_) => "invalid_data",
            AnalysisError::ApiError(_) => "api_error",
            AnalysisError::Config(_) => "config_error",
        }
    }
}
