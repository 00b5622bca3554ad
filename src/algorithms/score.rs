use crate::core::error::{AnalogError, Result};

/// Upper bound of the similarity scale, reached at distance zero.
pub const MAX_SCORE: f64 = 100.0;

/// Map a raw DTW distance onto the `(0, 100]` similarity scale.
///
/// `score = 100 * exp(-distance / window_length)`
///
/// Dividing by the window length keeps scores comparable between
/// configurations: a longer window accumulates more distance for the same
/// per-point mismatch, and pays proportionally less per unit of it.
pub fn similarity_score(distance: f64, window_length: usize) -> Result<f64> {
    if window_length == 0 {
        return Err(AnalogError::InvalidInput(
            "window_length must be >= 1 to score a distance".to_string(),
        ));
    }
    if distance.is_nan() || distance < 0.0 {
        return Err(AnalogError::InvalidInput(format!(
            "distance must be non-negative, got {distance}"
        )));
    }
    let alpha = 1.0 / window_length as f64;
    Ok(MAX_SCORE * (-alpha * distance).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance_scores_max() {
        for l in [1, 5, 7, 15, 250] {
            assert_eq!(similarity_score(0.0, l).unwrap(), 100.0);
        }
    }

    #[test]
    fn test_hand_computed() {
        // distance 7, L = 7 → 100 * e^-1
        let s = similarity_score(7.0, 7).unwrap();
        assert!((s - 100.0 / std::f64::consts::E).abs() < 1e-12);
    }

    #[test]
    fn test_strictly_decreasing() {
        let scores: Vec<f64> = [0.0, 0.1, 0.5, 1.0, 3.0, 10.0]
            .iter()
            .map(|&d| similarity_score(d, 5).unwrap())
            .collect();
        for w in scores.windows(2) {
            assert!(w[0] > w[1], "{} should exceed {}", w[0], w[1]);
        }
    }

    #[test]
    fn test_longer_window_is_gentler() {
        assert!(similarity_score(2.0, 15).unwrap() > similarity_score(2.0, 7).unwrap());
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(matches!(
            similarity_score(1.0, 0),
            Err(AnalogError::InvalidInput(_))
        ));
        assert!(similarity_score(-0.5, 3).is_err());
        assert!(similarity_score(f64::NAN, 3).is_err());
    }

    #[test]
    fn test_infinite_distance_scores_zero() {
        assert_eq!(similarity_score(f64::INFINITY, 3).unwrap(), 0.0);
    }
}
