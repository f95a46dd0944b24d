use analysis_core::AnalysisError;

/// Successive differences `data[i] - data[i - 1]`
pub fn price_deltas(data: &[f64]) -> Vec<f64> {
    data.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Relative Strength Index of the most recent `period` deltas.
///
/// Average gain and loss are simple means over the last `period` deltas
/// (a rolling mean, not Wilder smoothing). When the average loss is zero the
/// RSI is pinned at 100, including a perfectly flat window.
pub fn rsi(data: &[f64], period: usize) -> Result<f64, AnalysisError> {
    if period == 0 {
        return Err(AnalysisError::InvalidData("RSI period must be at least 1".to_string()));
    }
    let needed = period
        .checked_add(1)
        .ok_or_else(|| AnalysisError::InvalidData(format!("RSI period {} is too large", period)))?;
    if data.len() < needed {
        return Err(AnalysisError::InsufficientData {
            needed,
            got: data.len(),
        });
    }
    if data.iter().any(|p| !p.is_finite()) {
        return Err(AnalysisError::InvalidData("Price series contains non-finite values".to_string()));
    }

    let deltas = price_deltas(data);
    let window = &deltas[deltas.len() - period..];

    let avg_gain = window.iter().map(|d| d.max(0.0)).sum::<f64>() / period as f64;
    let avg_loss = window.iter().map(|d| (-d).max(0.0)).sum::<f64>() / period as f64;

    if avg_loss == 0.0 {
        return Ok(100.0);
    }

    let rs = avg_gain / avg_loss;
    Ok(100.0 - (100.0 / (1.0 + rs)))
}
