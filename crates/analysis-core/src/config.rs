use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::AnalysisError;

pub const DEFAULT_SENTIMENT_THRESHOLD: f64 = 0.7;
pub const DEFAULT_RSI_BUY_THRESHOLD: f64 = 30.0;
pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_LOOKBACK_DAYS: i64 = 60;
pub const DEFAULT_SERVICE_VERSION: &str = "1.0.0";
pub const MAX_RSI_PERIOD: usize = 1000;
pub const MAX_LOOKBACK_DAYS: i64 = 36_500;

/// Thresholds and windows shared by the scorers and the signal decider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Sentiment must be strictly above this (0-1) to count as bullish
    pub sentiment_threshold: f64,
    /// RSI must be strictly below this (0-100) to count as oversold
    pub rsi_buy_threshold: f64,
    pub rsi_period: usize,
    /// Calendar days of daily history fetched per request
    pub lookback_days: i64,
    pub service_version: String,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            sentiment_threshold: DEFAULT_SENTIMENT_THRESHOLD,
            rsi_buy_threshold: DEFAULT_RSI_BUY_THRESHOLD,
            rsi_period: DEFAULT_RSI_PERIOD,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            service_version: DEFAULT_SERVICE_VERSION.to_string(),
        }
    }
}

/// Parse an env var, falling back to `default` when unset, blank or malformed.
pub fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!("Ignoring unparseable {}={:?}, using default", name, raw);
                default
            }
        },
        _ => default,
    }
}

impl SignalConfig {
    pub fn from_env() -> Result<Self, AnalysisError> {
        let config = Self {
            sentiment_threshold: env_or("SENTIMENT_BUY_THRESHOLD", DEFAULT_SENTIMENT_THRESHOLD),
            rsi_buy_threshold: env_or("RSI_BUY_THRESHOLD", DEFAULT_RSI_BUY_THRESHOLD),
            rsi_period: env_or("RSI_PERIOD", DEFAULT_RSI_PERIOD),
            lookback_days: env_or("PRICE_LOOKBACK_DAYS", DEFAULT_LOOKBACK_DAYS),
            service_version: env_or("SERVICE_VERSION", DEFAULT_SERVICE_VERSION.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(0.0..=1.0).contains(&self.sentiment_threshold) {
            return Err(AnalysisError::Config(format!(
                "sentiment_threshold must be within [0, 1], got {}",
                self.sentiment_threshold
            )));
        }
        if !(0.0..=100.0).contains(&self.rsi_buy_threshold) {
            return Err(AnalysisError::Config(format!(
                "rsi_buy_threshold must be within [0, 100], got {}",
                self.rsi_buy_threshold
            )));
        }
        if !(1..=MAX_RSI_PERIOD).contains(&self.rsi_period) {
            return Err(AnalysisError::Config(format!(
                "rsi_period must be within [1, {}], got {}",
                MAX_RSI_PERIOD, self.rsi_period
            )));
        }
        if !(1..=MAX_LOOKBACK_DAYS).contains(&self.lookback_days) {
            return Err(AnalysisError::Config(format!(
                "lookback_days must be within [1, {}], got {}",
                MAX_LOOKBACK_DAYS, self.lookback_days
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SignalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rsi_period, 14);
        assert_eq!(config.lookback_days, 60);
        assert_eq!(config.service_version, "1.0.0");
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = SignalConfig::default();
        config.sentiment_threshold = 1.5;
        assert!(matches!(config.validate(), Err(AnalysisError::Config(_))));

        let mut config = SignalConfig::default();
        config.rsi_buy_threshold = -1.0;
        assert!(config.validate().is_err());

        let mut config = SignalConfig::default();
        config.rsi_period = 0;
        assert!(config.validate().is_err());

        let mut config = SignalConfig::default();
        config.lookback_days = 0;
        assert!(config.validate().is_err());

        let mut config = SignalConfig::default();
        config.rsi_period = usize::MAX;
        assert!(matches!(config.validate(), Err(AnalysisError::Config(_))));
        config.rsi_period = MAX_RSI_PERIOD;
        assert!(config.validate().is_ok());

        let mut config = SignalConfig::default();
        config.lookback_days = i64::MAX / 2;
        assert!(matches!(config.validate(), Err(AnalysisError::Config(_))));
        config.lookback_days = MAX_LOOKBACK_DAYS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_or_falls_back() {
        env::set_var("ANALYSIS_CORE_TEST_BAD_FLOAT", "abc");
        assert_eq!(env_or("ANALYSIS_CORE_TEST_BAD_FLOAT", 0.7), 0.7);
        env::set_var("ANALYSIS_CORE_TEST_GOOD_FLOAT", " 0.65 ");
        assert_eq!(env_or("ANALYSIS_CORE_TEST_GOOD_FLOAT", 0.7), 0.65);
        assert_eq!(env_or("ANALYSIS_CORE_TEST_UNSET", 14usize), 14);
    }
}
