//! Polygon.io aggregates client.

use analysis_core::{AnalysisError, Bar, MarketDataProvider};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

const BASE_URL: &str = "https://api.polygon.io";

#[derive(Debug, Deserialize)]
struct AggregateResponse {
    #[serde(default)]
    results: Vec<AggregateResult>,
}

#[derive(Debug, Deserialize)]
struct AggregateResult {
    t: i64, // timestamp (ms)
    o: f64, // open
    h: f64, // high
    l: f64, // low
    c: f64, // close
    v: f64, // volume
}

fn bars_from_aggregates(body: AggregateResponse) -> Vec<Bar> {
    let mut bars: Vec<Bar> = body
        .results
        .into_iter()
        .filter_map(|r| {
            Some(Bar {
                timestamp: DateTime::from_timestamp_millis(r.t)?,
                open: r.o,
                high: r.h,
                low: r.l,
                close: r.c,
                volume: r.v,
            })
        })
        .collect();
    bars.sort_by_key(|b| b.timestamp);
    bars
}

#[derive(Clone)]
pub struct PolygonClient {
    api_key: String,
    client: Client,
}

impl PolygonClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: super::http_client(),
        }
    }

    /// Get aggregates (bars) for a symbol
    pub async fn get_aggregates(
        &self,
        symbol: &str,
        multiplier: u32,
        timespan: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Bar>, AnalysisError> {
        let url = format!(
            "{}/v2/aggs/ticker/{}/range/{}/{}/{}/{}",
            BASE_URL,
            symbol.trim().to_uppercase(),
            multiplier,
            timespan,
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d")
        );
        tracing::debug!("Fetching Polygon aggregates: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str()), ("adjusted", "true"), ("sort", "asc")])
            .send()
            .await
            .map_err(|e| AnalysisError::ApiError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AnalysisError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let agg_response: AggregateResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::ApiError(e.to_string()))?;

        Ok(bars_from_aggregates(agg_response))
    }
}

#[async_trait]
impl MarketDataProvider for PolygonClient {
    fn name(&self) -> &str {
        "polygon"
    }

    async fn daily_history(&self, ticker: &str, lookback_days: i64) -> Result<Vec<Bar>, AnalysisError> {
        let (from, to) = crate::lookback_window(Utc::now(), lookback_days)?;
        self.get_aggregates(ticker, 1, "day", from, to).await
    }
}
