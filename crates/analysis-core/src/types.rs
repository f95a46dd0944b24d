use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::AnalysisError;

/// Daily OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Aggregated sentiment over a text corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Mean polarity rescaled to 0.0 - 1.0
    pub normalized_score: f64,
    /// Mean polarity on the -1.0 - 1.0 scale
    pub raw_polarity: f64,
    pub num_posts: usize,
    pub valid_posts: usize,
    /// Indices of texts excluded from the mean
    #[serde(skip)]
    pub skipped: Vec<usize>,
}

impl SentimentResult {
    /// Neutral result used when nothing could be scored.
    pub fn neutral(num_posts: usize, skipped: Vec<usize>) -> Self {
        Self {
            normalized_score: 0.5,
            raw_polarity: 0.0,
            num_posts,
            valid_posts: 0,
            skipped,
        }
    }

    /// True when texts were supplied but none of them produced a polarity.
    pub fn is_degraded(&self) -> bool {
        self.num_posts > 0 && self.valid_posts == 0
    }
}

/// RSI plus the latest price/volume for a ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalResult {
    pub rsi: Option<f64>,
    pub volume: Option<u64>,
    pub price: Option<f64>,
    pub avg_volume: Option<u64>,
    pub data_points: usize,
}

impl TechnicalResult {
    pub fn unavailable() -> Self {
        Self {
            rsi: None,
            volume: None,
            price: None,
            avg_volume: None,
            data_points: 0,
        }
    }
}

/// Discrete trading recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Hold,
    Neutral,
    Error,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Hold => "HOLD",
            Signal::Neutral => "NEUTRAL",
            Signal::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Success,
    Partial,
    Error,
}

/// Structured error as it appears in the `errors` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl From<&AnalysisError> for ErrorEntry {
    fn from(e: &AnalysisError) -> Self {
        Self {
            kind: e.kind().to_string(),
            message: e.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentDetails {
    pub num_posts: usize,
    pub valid_posts: usize,
    pub raw_polarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalDetails {
    pub avg_volume: Option<u64>,
    pub data_points: usize,
}

/// Static configuration echo plus per-computation details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalMetadata {
    pub sentiment_analyzer: String,
    pub service_version: String,
    pub rsi_period: usize,
    pub sentiment_threshold: f64,
    pub rsi_buy_threshold: f64,
    pub sentiment_details: SentimentDetails,
    pub technical_details: TechnicalDetails,
}

/// Final per-request output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub signal: Signal,
    pub ticker: String,
    pub sentiment_score: f64,
    pub rsi: Option<f64>,
    pub volume: Option<u64>,
    pub price: Option<f64>,
    pub reason: String,
    #[serde(serialize_with = "serialize_utc_z")]
    pub timestamp: DateTime<Utc>,
    pub status: RecordStatus,
    pub metadata: SignalMetadata,
    pub errors: Vec<ErrorEntry>,
}

fn serialize_utc_z<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_signal_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Signal::Buy).unwrap(), "\"BUY\"");
        assert_eq!(serde_json::to_string(&Signal::Neutral).unwrap(), "\"NEUTRAL\"");
        assert_eq!(Signal::Hold.to_string(), "HOLD");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RecordStatus::Partial).unwrap(), "\"partial\"");
    }

    #[test]
    fn test_error_entry_uses_type_key() {
        let entry = ErrorEntry::from(&AnalysisError::DataUnavailable("no rows for XYZ".into()));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "data_unavailable");
        assert_eq!(value["message"], "Data unavailable: no rows for XYZ");
    }

    #[test]
    fn test_sentiment_skipped_not_serialized() {
        let result = SentimentResult::neutral(2, vec![0, 1]);
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("skipped").is_none());
        assert!(result.is_degraded());
        assert!(!SentimentResult::neutral(0, vec![]).is_degraded());
    }

    #[test]
    fn test_timestamp_is_iso8601_utc() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();
        let mut serializer = serde_json::Serializer::new(Vec::new());
        serialize_utc_z(&ts, &mut serializer).unwrap();
        let out = String::from_utf8(serializer.into_inner()).unwrap();
        assert_eq!(out, "\"2024-03-01T14:30:00.000000Z\"");
    }
}
