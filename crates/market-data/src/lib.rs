//! Market-data providers backing the technical indicator calculator.

use std::sync::Arc;
use std::time::Duration;

use analysis_core::{AnalysisError, MarketDataProvider};
use chrono::{DateTime, Utc};
use reqwest::Client;

pub mod polygon;
pub mod yahoo;

pub use polygon::PolygonClient;
pub use yahoo::YahooChartClient;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn http_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent("Mozilla/5.0 (X11; Linux x86_64) trading-signal-service")
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// `(from, to)` covering the `lookback_days` calendar days before `to`.
pub fn lookback_window(
    to: DateTime<Utc>,
    lookback_days: i64,
) -> Result<(DateTime<Utc>, DateTime<Utc>), AnalysisError> {
    let from = chrono::Duration::try_days(lookback_days)
        .and_then(|span| to.checked_sub_signed(span))
        .ok_or_else(|| AnalysisError::InvalidData(format!("lookback of {} days is out of range", lookback_days)))?;
    Ok((from, to))
}

/// Which upstream serves price history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Yahoo,
    Polygon,
}

impl std::str::FromStr for ProviderKind {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yahoo" | "yfinance" => Ok(ProviderKind::Yahoo),
            "polygon" => Ok(ProviderKind::Polygon),
            other => Err(AnalysisError::Config(format!(
                "unknown market data provider '{}', expected 'yahoo' or 'polygon'",
                other
            ))),
        }
    }
}

/// Build the configured provider. Polygon requires an API key.
pub fn build_provider(
    kind: ProviderKind,
    polygon_api_key: Option<String>,
) -> Result<Arc<dyn MarketDataProvider>, AnalysisError> {
    match kind {
        ProviderKind::Yahoo => Ok(Arc::new(YahooChartClient::new())),
        ProviderKind::Polygon => {
            let key = polygon_api_key
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| AnalysisError::Config("POLYGON_API_KEY is required for the polygon provider".to_string()))?;
            Ok(Arc::new(PolygonClient::new(key)))
        }
    }
}
