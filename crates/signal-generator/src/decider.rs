use analysis_core::Signal;

/// Map a sentiment score and RSI onto a signal plus an auditable reason.
///
/// | sentiment > threshold | rsi < buy threshold | signal  |
/// |-----------------------|---------------------|---------|
/// | yes                   | yes                 | BUY     |
/// | yes                   | no                  | HOLD    |
/// | no                    | yes                 | HOLD    |
/// | no                    | no                  | NEUTRAL |
///
/// A missing RSI always yields ERROR.
pub fn decide(
    sentiment: f64,
    rsi: Option<f64>,
    sentiment_threshold: f64,
    rsi_buy_threshold: f64,
) -> (Signal, String) {
    let Some(rsi) = rsi else {
        let reason = format!(
            "RSI unavailable: sentiment {:.2} (threshold {}) cannot be confirmed without technical data (RSI buy threshold {}).",
            sentiment, sentiment_threshold, rsi_buy_threshold
        );
        return (Signal::Error, reason);
    };

    let sentiment_bullish = sentiment > sentiment_threshold;
    let rsi_oversold = rsi < rsi_buy_threshold;

    match (sentiment_bullish, rsi_oversold) {
        (true, true) => (
            Signal::Buy,
            format!(
                "Strong bullish sentiment ({:.2} > {}) combined with oversold conditions (RSI {:.2} < {}). Potential buying opportunity.",
                sentiment, sentiment_threshold, rsi, rsi_buy_threshold
            ),
        ),
        (true, false) => (
            Signal::Hold,
            format!(
                "Bullish sentiment ({:.2} > {}) but RSI ({:.2}) not oversold (>= {}). Wait for better entry point.",
                sentiment, sentiment_threshold, rsi, rsi_buy_threshold
            ),
        ),
        (false, true) => (
            Signal::Hold,
            format!(
                "RSI oversold ({:.2} < {}) but sentiment weak ({:.2} <= {}). Technical setup present but lacking sentiment confirmation.",
                rsi, rsi_buy_threshold, sentiment, sentiment_threshold
            ),
        ),
        (false, false) => (
            Signal::Neutral,
            format!(
                "Neutral conditions: sentiment={:.2} (threshold {}), RSI={:.2} (buy threshold {}). No clear trading opportunity.",
                sentiment, sentiment_threshold, rsi, rsi_buy_threshold
            ),
        ),
    }
}
