//! Yahoo Finance chart API client for daily price history.

use analysis_core::{AnalysisError, Bar, MarketDataProvider};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

const BASE_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Deserialize)]
struct QuoteSeries {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<u64>>>,
}

/// Yahoo uses hyphens instead of dots for share classes (BRK-B, not BRK.B)
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase().replace('.', "-")
}

/// Convert a chart payload into chronological bars.
///
/// Rows without a positive close are dropped; Yahoo pads holidays and the
/// in-progress session with nulls.
fn bars_from_chart(symbol: &str, body: ChartResponse) -> Result<Vec<Bar>, AnalysisError> {
    if let Some(error) = body.chart.error {
        return Err(AnalysisError::ApiError(format!(
            "Yahoo error for {}: {} - {}",
            symbol, error.code, error.description
        )));
    }

    let result = body
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| AnalysisError::DataUnavailable(format!("No chart results for {}", symbol)))?;

    let timestamps = result.timestamp.unwrap_or_default();
    let quote = match result.indicators.quote.into_iter().next() {
        Some(q) => q,
        None => return Ok(Vec::new()),
    };

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let close = match closes.get(i).copied().flatten() {
            Some(c) if c > 0.0 => c,
            _ => continue,
        };
        let Some(timestamp) = DateTime::from_timestamp(ts, 0) else {
            continue;
        };

        bars.push(Bar {
            timestamp,
            open: opens.get(i).copied().flatten().unwrap_or(close),
            high: highs.get(i).copied().flatten().unwrap_or(close),
            low: lows.get(i).copied().flatten().unwrap_or(close),
            close,
            volume: volumes.get(i).copied().flatten().unwrap_or(0) as f64,
        });
    }

    bars.sort_by_key(|b| b.timestamp);
    Ok(bars)
}

#[derive(Clone)]
pub struct YahooChartClient {
    client: Client,
}

impl YahooChartClient {
    pub fn new() -> Self {
        Self {
            client: super::http_client(),
        }
    }

    /// Fetch daily bars between `from` and `to`.
    pub async fn get_daily_bars(
        &self,
        symbol: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Bar>, AnalysisError> {
        let yahoo_symbol = normalize_symbol(symbol);
        let url = format!("{}/v8/finance/chart/{}", BASE_URL, yahoo_symbol);
        tracing::debug!("Fetching Yahoo chart: {} ({} -> {})", url, from.date_naive(), to.date_naive());

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", from.timestamp().to_string()),
                ("period2", to.timestamp().to_string()),
                ("interval", "1d".to_string()),
                ("includePrePost", "false".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AnalysisError::ApiError(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(AnalysisError::DataUnavailable(format!("Unknown ticker {}", yahoo_symbol)));
        }
        if !status.is_success() {
            return Err(AnalysisError::ApiError(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            )));
        }

        let body: ChartResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::ApiError(e.to_string()))?;

        bars_from_chart(&yahoo_symbol, body)
    }
}

impl Default for YahooChartClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for YahooChartClient {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn daily_history(&self, ticker: &str, lookback_days: i64) -> Result<Vec<Bar>, AnalysisError> {
        let (from, to) = crate::lookback_window(Utc::now(), lookback_days)?;
        self.get_daily_bars(ticker, from, to).await
    }
}
