use analysis_core::stats::{mean, round_to};
use analysis_core::{
    AnalysisError, Bar, MarketDataProvider, TechnicalResult, DEFAULT_LOOKBACK_DAYS, DEFAULT_RSI_PERIOD,
};

use crate::indicators::rsi;

/// RSI, latest price and volume over a fixed lookback of daily bars
#[derive(Debug, Clone)]
pub struct TechnicalAnalysisEngine {
    rsi_period: usize,
    lookback_days: i64,
}

impl TechnicalAnalysisEngine {
    pub fn new(rsi_period: usize, lookback_days: i64) -> Self {
        Self {
            rsi_period,
            lookback_days,
        }
    }

    /// Compute the indicator set from already fetched bars.
    pub fn compute(&self, bars: &[Bar]) -> Result<TechnicalResult, AnalysisError> {
        let last = bars
            .last()
            .ok_or_else(|| AnalysisError::DataUnavailable("Price series is empty".to_string()))?;

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let rsi_value = rsi(&closes, self.rsi_period)?;

        let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

        Ok(TechnicalResult {
            rsi: Some(round_to(rsi_value, 2)),
            volume: Some(last.volume.max(0.0) as u64),
            price: Some(round_to(last.close, 2)),
            avg_volume: Some(mean(&volumes).max(0.0) as u64),
            data_points: bars.len(),
        })
    }

    /// Fetch history for `ticker` and compute the indicator set.
    ///
    /// Provider failures and empty histories surface as `DataUnavailable`.
    pub async fn analyze(
        &self,
        provider: &dyn MarketDataProvider,
        ticker: &str,
    ) -> Result<TechnicalResult, AnalysisError> {
        let bars = match provider.daily_history(ticker, self.lookback_days).await {
            Ok(bars) => bars,
            Err(AnalysisError::DataUnavailable(msg)) => {
                tracing::error!("No market data for {}: {}", ticker, msg);
                return Err(AnalysisError::DataUnavailable(msg));
            }
            Err(e) => {
                tracing::error!("Market data fetch failed for {} via {}: {}", ticker, provider.name(), e);
                return Err(AnalysisError::DataUnavailable(format!(
                    "Unable to fetch data for ticker {}: {}",
                    ticker, e
                )));
            }
        };

        if bars.is_empty() {
            tracing::error!("No data returned for ticker {}", ticker);
            return Err(AnalysisError::DataUnavailable(format!(
                "Unable to fetch data for ticker {}",
                ticker
            )));
        }

        tracing::info!("Fetched {} data points for {} from {}", bars.len(), ticker, provider.name());

        let result = self.compute(&bars).map_err(|e| {
            tracing::error!("RSI calculation failed for {}: {}", ticker, e);
            e
        })?;

        tracing::info!(
            "Technical analysis for {}: RSI={:?}, Volume={:?}, Price={:?}",
            ticker,
            result.rsi,
            result.volume,
            result.price
        );

        Ok(result)
    }
}

impl Default for TechnicalAnalysisEngine {
    fn default() -> Self {
        Self::new(DEFAULT_RSI_PERIOD, DEFAULT_LOOKBACK_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};

    fn bars_from(closes: &[f64]) -> Vec<Bar> {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 21, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: start + Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000_000.0 + (i as f64) * 1_000.0,
            })
            .collect()
    }

    struct StubProvider {
        response: Result<Vec<Bar>, AnalysisError>,
    }

    #[async_trait]
    impl MarketDataProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn daily_history(&self, _ticker: &str, _lookback_days: i64) -> Result<Vec<Bar>, AnalysisError> {
            self.response.clone()
        }
    }

    #[test]
    fn test_compute_latest_fields() {
        let closes: Vec<f64> = (0..20).map(|i| 150.0 + (i % 4) as f64 * 0.75).collect();
        let bars = bars_from(&closes);
        let result = TechnicalAnalysisEngine::default().compute(&bars).unwrap();

        assert_eq!(result.data_points, 20);
        assert_eq!(result.price, Some(152.25));
        assert_eq!(result.volume, Some(1_019_000));
        assert_eq!(result.avg_volume, Some(1_009_500));
        let rsi = result.rsi.unwrap();
        assert!((0.0..=100.0).contains(&rsi));
    }

    #[test]
    fn test_compute_rounds_rsi_and_price() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.6449,
        ];
        let result = TechnicalAnalysisEngine::default().compute(&bars_from(&closes)).unwrap();
        assert_eq!(result.price, Some(45.64));
        let rsi = result.rsi.unwrap();
        assert_eq!(rsi, round_to(rsi, 2));
    }

    #[test]
    fn test_compute_insufficient_bars() {
        let bars = bars_from(&[10.0, 10.5, 11.0]);
        let err = TechnicalAnalysisEngine::default().compute(&bars).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientData { needed: 15, got: 3 });
    }

    #[test]
    fn test_compute_empty_is_unavailable() {
        let err = TechnicalAnalysisEngine::default().compute(&[]).unwrap_err();
        assert!(matches!(err, AnalysisError::DataUnavailable(_)));
    }

    #[test]
    fn test_analyze_maps_provider_errors() {
        let provider = StubProvider {
            response: Err(AnalysisError::ApiError("HTTP 500".to_string())),
        };
        let engine = TechnicalAnalysisEngine::default();
        let err = tokio_test::block_on(engine.analyze(&provider, "AAPL")).unwrap_err();
        match err {
            AnalysisError::DataUnavailable(msg) => assert!(msg.contains("AAPL") && msg.contains("HTTP 500")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_analyze_empty_history() {
        let provider = StubProvider { response: Ok(Vec::new()) };
        let engine = TechnicalAnalysisEngine::default();
        let err = tokio_test::block_on(engine.analyze(&provider, "XYZ")).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::DataUnavailable("Unable to fetch data for ticker XYZ".to_string())
        );
    }

    #[test]
    fn test_analyze_success() {
        let closes: Vec<f64> = (0..42).map(|i| 100.0 - (i as f64) * 0.5).collect();
        let provider = StubProvider { response: Ok(bars_from(&closes)) };
        let engine = TechnicalAnalysisEngine::new(14, 60);
        let result = tokio_test::block_on(engine.analyze(&provider, "TSLA")).unwrap();
        assert_eq!(result.rsi, Some(0.0));
        assert_eq!(result.data_points, 42);
        assert_eq!(result.price, Some(79.5));
    }
}
