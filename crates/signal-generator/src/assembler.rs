use analysis_core::{
    AnalysisError, ErrorEntry, RecordStatus, SentimentDetails, SentimentResult, SignalConfig, SignalMetadata,
    SignalRecord, TechnicalDetails, TechnicalResult,
};
use chrono::{DateTime, Utc};

use crate::decider::decide;

/// Status of a record given both sub-computations.
pub fn record_status(sentiment: &SentimentResult, technical: &Result<TechnicalResult, AnalysisError>) -> RecordStatus {
    match technical {
        Err(_) => RecordStatus::Error,
        Ok(_) if sentiment.is_degraded() => RecordStatus::Partial,
        Ok(_) => RecordStatus::Success,
    }
}

/// Merge sentiment, technical output and the decided signal into one record.
///
/// Pure: the timestamp is supplied by the caller, so equal inputs produce
/// equal records.
pub fn assemble(
    ticker: &str,
    analyzer_name: &str,
    sentiment: &SentimentResult,
    technical: &Result<TechnicalResult, AnalysisError>,
    config: &SignalConfig,
    timestamp: DateTime<Utc>,
) -> SignalRecord {
    let unavailable = TechnicalResult::unavailable();
    let tech = technical.as_ref().unwrap_or(&unavailable);

    let (signal, mut reason) = decide(
        sentiment.normalized_score,
        tech.rsi,
        config.sentiment_threshold,
        config.rsi_buy_threshold,
    );

    let mut errors: Vec<ErrorEntry> = sentiment
        .skipped
        .iter()
        .map(|&index| ErrorEntry::from(&AnalysisError::SentimentParseSkipped { index }))
        .collect();

    if let Err(e) = technical {
        reason = format!("Unable to fetch technical data: {}. {}", e, reason);
        errors.push(ErrorEntry::from(e));
    }

    SignalRecord {
        signal,
        ticker: ticker.trim().to_uppercase(),
        sentiment_score: sentiment.normalized_score,
        rsi: tech.rsi,
        volume: tech.volume,
        price: tech.price,
        reason,
        timestamp,
        status: record_status(sentiment, technical),
        metadata: SignalMetadata {
            sentiment_analyzer: analyzer_name.to_string(),
            service_version: config.service_version.clone(),
            rsi_period: config.rsi_period,
            sentiment_threshold: config.sentiment_threshold,
            rsi_buy_threshold: config.rsi_buy_threshold,
            sentiment_details: SentimentDetails {
                num_posts: sentiment.num_posts,
                valid_posts: sentiment.valid_posts,
                raw_polarity: sentiment.raw_polarity,
            },
            technical_details: TechnicalDetails {
                avg_volume: tech.avg_volume,
                data_points: tech.data_points,
            },
        },
        errors,
    }
}
