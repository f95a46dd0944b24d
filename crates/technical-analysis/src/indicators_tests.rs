#[cfg(test)]
mod tests {
    use super::super::indicators::*;
    use analysis_core::AnalysisError;
    use approx::assert_relative_eq;

    // Helper function to create sample price data
    fn sample_prices() -> Vec<f64> {
        vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
        ]
    }

    #[test]
    fn test_price_deltas() {
        let deltas = price_deltas(&[1.0, 3.0, 2.0, 2.0]);
        assert_eq!(deltas, vec![2.0, -1.0, 0.0]);
        assert!(price_deltas(&[5.0]).is_empty());
    }

    #[test]
    fn test_rsi_simple_average_window() {
        // Only the last 14 deltas count: avg_gain 0.17643, avg_loss 0.11857
        let value = rsi(&sample_prices(), 14).unwrap();
        assert_relative_eq!(value, 59.806295, epsilon = 1e-4);
    }

    #[test]
    fn test_rsi_alternating_is_fifty() {
        let prices = vec![
            10.0, 11.0, 10.0, 11.0, 10.0, 11.0, 10.0, 11.0, 10.0, 11.0, 10.0, 11.0, 10.0, 11.0, 10.0,
        ];
        assert_relative_eq!(rsi(&prices, 14).unwrap(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rsi_all_gains_is_hundred() {
        let prices: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        assert_eq!(rsi(&prices, 14).unwrap(), 100.0);
    }

    #[test]
    fn test_rsi_all_losses_is_zero() {
        let prices: Vec<f64> = (0..15).map(|i| 100.0 - i as f64).collect();
        assert_relative_eq!(rsi(&prices, 14).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rsi_flat_series_is_hundred() {
        // avg_gain == avg_loss == 0 resolves to 100, same as the zero-loss rule
        let prices = vec![42.0; 30];
        assert_eq!(rsi(&prices, 14).unwrap(), 100.0);
    }

    #[test]
    fn test_rsi_ignores_losses_outside_window() {
        // A crash early in the series falls outside the 14-delta window
        let mut prices = vec![100.0, 50.0];
        prices.extend((1..=14).map(|i| 50.0 + i as f64));
        assert_eq!(rsi(&prices, 14).unwrap(), 100.0);
    }

    #[test]
    fn test_rsi_exactly_period_plus_one() {
        let prices: Vec<f64> = (0..15).map(|i| if i % 3 == 0 { 10.0 } else { 10.5 }).collect();
        assert!(rsi(&prices, 14).is_ok());
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let prices = vec![1.0; 14];
        let err = rsi(&prices, 14).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientData { needed: 15, got: 14 });
    }

    #[test]
    fn test_rsi_zero_period() {
        assert!(matches!(rsi(&sample_prices(), 0), Err(AnalysisError::InvalidData(_))));
    }

    #[test]
    fn test_rsi_huge_period_is_invalid() {
        assert!(matches!(rsi(&[1.0, 2.0, 3.0], usize::MAX), Err(AnalysisError::InvalidData(_))));
    }

    #[test]
    fn test_rsi_rejects_nan() {
        let mut prices = sample_prices();
        prices[18] = f64::NAN;
        assert!(matches!(rsi(&prices, 14), Err(AnalysisError::InvalidData(_))));
    }

    #[test]
    fn test_rsi_bounded() {
        let series = [
            vec![3.0, 9.0, 1.0, 7.5, 2.2, 8.8, 0.5, 6.0, 6.1, 2.0, 9.9, 0.1, 4.4, 5.5, 3.3, 7.7],
            vec![1e6, 1e-3, 1e6, 1e-3, 1e6, 1e-3, 1e6, 1e-3, 1e6, 1e-3, 1e6, 1e-3, 1e6, 1e-3, 1e6],
            sample_prices(),
        ];
        for prices in series.iter() {
            for period in [1usize, 5, 14] {
                let value = rsi(prices, period).unwrap();
                assert!((0.0..=100.0).contains(&value), "rsi {} out of range", value);
            }
        }
    }
}
