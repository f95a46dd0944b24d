use analysis_core::{MarketDataProvider, PolarityEstimator, SignalConfig, SignalRecord};
use chrono::Utc;
use sentiment_analysis::SentimentAnalysisEngine;
use std::sync::Arc;
use technical_analysis::TechnicalAnalysisEngine;

pub mod assembler;
pub mod decider;

pub use assembler::{assemble, record_status};
pub use decider::decide;

/// Runs sentiment and technical analysis for one request and decides a signal.
pub struct SignalGenerator {
    config: SignalConfig,
    sentiment_analyzer: SentimentAnalysisEngine,
    technical_analyzer: TechnicalAnalysisEngine,
    provider: Arc<dyn MarketDataProvider>,
}

impl SignalGenerator {
    pub fn new(
        config: SignalConfig,
        estimator: Arc<dyn PolarityEstimator>,
        provider: Arc<dyn MarketDataProvider>,
    ) -> Self {
        tracing::info!(
            "SignalGenerator initialized: sentiment_threshold={}, rsi_buy_threshold={}, rsi_period={}, provider={}",
            config.sentiment_threshold,
            config.rsi_buy_threshold,
            config.rsi_period,
            provider.name()
        );

        Self {
            technical_analyzer: TechnicalAnalysisEngine::new(config.rsi_period, config.lookback_days),
            sentiment_analyzer: SentimentAnalysisEngine::new(estimator),
            config,
            provider,
        }
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    pub fn provider(&self) -> &Arc<dyn MarketDataProvider> {
        &self.provider
    }

    /// Produce a complete record for `ticker`. Never fails: sub-computation
    /// errors end up in the record's `errors` list and `status`.
    pub async fn generate<S: AsRef<str>>(&self, ticker: &str, texts: &[S]) -> SignalRecord {
        let ticker = ticker.trim().to_uppercase();

        tracing::info!("Analyzing sentiment for {} from {} posts", ticker, texts.len());
        let sentiment = self.sentiment_analyzer.score(texts);

        tracing::info!("Fetching technical indicators for {}", ticker);
        let technical = self.technical_analyzer.analyze(self.provider.as_ref(), &ticker).await;

        let record = assemble(
            &ticker,
            self.sentiment_analyzer.analyzer_name(),
            &sentiment,
            &technical,
            &self.config,
            Utc::now(),
        );

        match &technical {
            Ok(_) => tracing::info!("Generated {} signal for {}: {}", record.signal, ticker, record.reason),
            Err(e) => tracing::error!("Technical analysis failed for {}: {}", ticker, e),
        }

        record
    }
}
