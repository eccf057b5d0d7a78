//! Pearson product-moment correlation over positionally paired series.

use serde::{Deserialize, Serialize};

use crate::HelioError;

/// Correlation coefficient between two equal-length series.
///
/// Returns a value between -1.0 (perfect inverse correlation) and 1.0
/// (perfect correlation). Degenerate inputs resolve to 0.0 rather than an
/// error: an empty pair of series, or zero variance in either series.
/// Mismatched lengths fail fast; pairing is positional, so silently
/// truncating would correlate the wrong observations.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64, HelioError> {
    if x.len() != y.len() {
        return Err(HelioError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.is_empty() {
        return Ok(0.0);
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (covariance, var_x, var_y) =
        x.iter()
            .zip(y.iter())
            .fold((0.0, 0.0, 0.0), |(cov, vx, vy), (&xi, &yi)| {
                let dx = xi - mean_x;
                let dy = yi - mean_y;
                (cov + dx * dy, vx + dx * dx, vy + dy * dy)
            });

    if var_x == 0.0 || var_y == 0.0 {
        return Ok(0.0);
    }

    // Float error can land a hair outside the mathematical range.
    Ok((covariance / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Qualitative strength bucket for a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    Minimal,
    Weak,
    Moderate,
    Strong,
}

impl CorrelationStrength {
    /// Classify on `|r|` with strict thresholds: exactly 0.7 is Moderate.
    pub fn classify(coefficient: f64) -> Self {
        let r = coefficient.abs();
        if r > 0.7 {
            CorrelationStrength::Strong
        } else if r > 0.4 {
            CorrelationStrength::Moderate
        } else if r > 0.2 {
            CorrelationStrength::Weak
        } else {
            CorrelationStrength::Minimal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CorrelationStrength::Minimal => "Minimal",
            CorrelationStrength::Weak => "Weak",
            CorrelationStrength::Moderate => "Moderate",
            CorrelationStrength::Strong => "Strong",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_identical_series_fully_correlated() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let r = pearson(&xs, &xs).unwrap();
        assert!((r - 1.0).abs() < 1e-9, "got {r}");
    }

    #[test]
    fn test_reversed_series_fully_anticorrelated() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [5.0, 4.0, 3.0, 2.0, 1.0];
        let r = pearson(&xs, &ys).unwrap();
        assert!((r + 1.0).abs() < 1e-9, "got {r}");
    }

    #[test]
    fn test_constant_series_degenerates_to_zero() {
        let constant = [1.0, 1.0, 1.0, 1.0];
        let ramp = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(pearson(&constant, &ramp).unwrap(), 0.0);
        assert_eq!(pearson(&ramp, &constant).unwrap(), 0.0);
        assert_eq!(pearson(&[7.0], &[3.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_series_is_zero_not_error() {
        assert_eq!(pearson(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch_fails_fast() {
        let err = pearson(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            crate::HelioError::LengthMismatch { left: 2, right: 1 }
        );
    }

    #[test]
    fn test_symmetric_in_arguments() {
        let xs = [3.0, 9.0, 1.0, 4.0, 7.0];
        let ys = [2.0, 8.0, 8.0, 1.0, 5.0];
        assert_eq!(pearson(&xs, &ys).unwrap(), pearson(&ys, &xs).unwrap());
    }

    #[test]
    fn test_range_bounded_on_noisy_input() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let xs: Vec<f64> = (0..24).map(|_| rng.gen_range(0.0..500.0)).collect();
            let ys: Vec<f64> = (0..24).map(|_| rng.gen_range(0.0..500.0)).collect();
            let r = pearson(&xs, &ys).unwrap();
            assert!((-1.0..=1.0).contains(&r), "out of range: {r}");
        }
    }

    #[test]
    fn test_strength_boundaries() {
        assert_eq!(
            CorrelationStrength::classify(0.75),
            CorrelationStrength::Strong
        );
        // Thresholds are strict: the boundary value falls into the bucket below.
        assert_eq!(
            CorrelationStrength::classify(0.7),
            CorrelationStrength::Moderate
        );
        assert_eq!(
            CorrelationStrength::classify(0.5),
            CorrelationStrength::Moderate
        );
        assert_eq!(
            CorrelationStrength::classify(0.4),
            CorrelationStrength::Weak
        );
        assert_eq!(
            CorrelationStrength::classify(0.3),
            CorrelationStrength::Weak
        );
        assert_eq!(
            CorrelationStrength::classify(0.2),
            CorrelationStrength::Minimal
        );
        assert_eq!(
            CorrelationStrength::classify(0.1),
            CorrelationStrength::Minimal
        );
    }

    #[test]
    fn test_strength_uses_absolute_value() {
        assert_eq!(
            CorrelationStrength::classify(-0.75),
            CorrelationStrength::Strong
        );
        assert_eq!(
            CorrelationStrength::classify(-0.3),
            CorrelationStrength::Weak
        );
    }
}
