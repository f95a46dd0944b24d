use analysis_core::stats::{mean, round_to};
use analysis_core::{PolarityEstimator, SentimentResult};
use std::sync::Arc;

pub mod lexicon;
pub use lexicon::LexiconPolarity;

/// Aggregates per-text polarity into one normalized sentiment score.
pub struct SentimentAnalysisEngine {
    estimator: Arc<dyn PolarityEstimator>,
}

impl SentimentAnalysisEngine {
    pub fn new(estimator: Arc<dyn PolarityEstimator>) -> Self {
        Self { estimator }
    }

    pub fn analyzer_name(&self) -> &str {
        self.estimator.name()
    }

    /// Polarity of a single text, or `None` when it cannot be scored.
    fn text_polarity(&self, text: &str) -> Option<f64> {
        if text.trim().is_empty() {
            return None;
        }
        self.estimator.polarity(text).filter(|p| p.is_finite())
    }

    /// Map [-1, 1] polarity onto [0, 1].
    pub fn normalize_score(polarity: f64) -> f64 {
        ((polarity + 1.0) / 2.0).clamp(0.0, 1.0)
    }

    /// Score a corpus. Texts that cannot be scored are left out of the mean
    /// and reported in `skipped`; an all-invalid or empty corpus is neutral.
    pub fn score<S: AsRef<str>>(&self, texts: &[S]) -> SentimentResult {
        if texts.is_empty() {
            tracing::warn!("No texts provided for sentiment analysis");
            return SentimentResult::neutral(0, Vec::new());
        }

        let mut polarities = Vec::with_capacity(texts.len());
        let mut skipped = Vec::new();

        for (index, text) in texts.iter().enumerate() {
            match self.text_polarity(text.as_ref()) {
                Some(p) => polarities.push(p),
                None => {
                    tracing::debug!("Skipping text #{} (no usable polarity)", index);
                    skipped.push(index);
                }
            }
        }

        if polarities.is_empty() {
            tracing::warn!("No valid texts found for sentiment analysis ({} supplied)", texts.len());
            return SentimentResult::neutral(texts.len(), skipped);
        }

        let avg_polarity = mean(&polarities);
        let normalized = Self::normalize_score(avg_polarity);

        tracing::info!(
            "Analyzed {} texts: avg_polarity={:.3}, normalized={:.3}",
            polarities.len(),
            avg_polarity,
            normalized
        );

        SentimentResult {
            normalized_score: round_to(normalized, 4),
            raw_polarity: round_to(avg_polarity, 4),
            num_posts: texts.len(),
            valid_posts: polarities.len(),
            skipped,
        }
    }
}

impl Default for SentimentAnalysisEngine {
    fn default() -> Self {
        Self::new(Arc::new(LexiconPolarity::new()))
    }
}
