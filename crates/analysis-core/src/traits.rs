use async_trait::async_trait;
use crate::{AnalysisError, Bar};

/// Text polarity estimator producing a score on the [-1, 1] scale.
///
/// Returns `None` when the text cannot be scored at all (for example it is
/// empty after normalization). Callers treat `None` and non-finite values as
/// invalid texts.
pub trait PolarityEstimator: Send + Sync {
    fn name(&self) -> &str;

    fn polarity(&self, text: &str) -> Option<f64>;
}

/// Source of daily price/volume history for a ticker
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Chronologically ordered daily bars covering the last `lookback_days`
    /// calendar days.
    async fn daily_history(&self, ticker: &str, lookback_days: i64) -> Result<Vec<Bar>, AnalysisError>;
}
