use nalgebra::{DMatrix, DVector};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Polynomial least-squares fitting (trend curves)
// ---------------------------------------------------------------------------

/// Trend curves are fitted with this degree, matching the original analysis.
pub const TREND_DEGREE: usize = 8;

/// How many points the sampled trend polyline carries across the data span.
pub const TREND_SAMPLES: usize = 200;

#[derive(Debug, Error)]
pub enum FitError {
    #[error("cannot fit an empty series")]
    EmptySeries,
    #[error("series lengths differ: {xs} xs vs {ys} ys")]
    LengthMismatch { xs: usize, ys: usize },
    #[error("least-squares solve failed: {0}")]
    Singular(String),
}

/// A fitted polynomial with coefficients in ascending order of power.
#[derive(Debug, Clone)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Evaluate at `x` by Horner's rule.
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }
}

/// Least-squares polynomial fit of the given degree over `(xs, ys)`.
///
/// The requested degree is clamped to `xs.len() - 1` so the Vandermonde
/// system stays determined for short series. Solved via SVD, which tolerates
/// the poor conditioning a degree-8 monomial basis brings along.
pub fn polyfit(xs: &[f64], ys: &[f64], degree: usize) -> Result<Polynomial, FitError> {
    if xs.len() != ys.len() {
        return Err(FitError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }
    if xs.is_empty() {
        return Err(FitError::EmptySeries);
    }

    let degree = degree.min(xs.len() - 1);
    let cols = degree + 1;

    let vandermonde = DMatrix::from_fn(xs.len(), cols, |r, c| xs[r].powi(c as i32));
    let rhs = DVector::from_column_slice(ys);

    let svd = vandermonde.svd(true, true);
    let solution = svd
        .solve(&rhs, f64::EPSILON.sqrt())
        .map_err(|e| FitError::Singular(e.to_string()))?;

    Ok(Polynomial {
        coeffs: solution.iter().copied().collect(),
    })
}

/// Fit a trend and sample it densely across `[min(xs), max(xs)]`, ready to
/// hand to the plot as a polyline.
pub fn sample_trend(xs: &[f64], ys: &[f64]) -> Result<Vec<[f64; 2]>, FitError> {
    let poly = polyfit(xs, ys, TREND_DEGREE)?;

    let lo = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !lo.is_finite() || !hi.is_finite() {
        return Err(FitError::EmptySeries);
    }

    let span = hi - lo;
    let points = if span == 0.0 { 1 } else { TREND_SAMPLES };
    Ok((0..points)
        .map(|i| {
            let x = lo + span * i as f64 / (points - 1).max(1) as f64;
            [x, poly.eval(x)]
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_a_quadratic() {
        let xs: Vec<f64> = (0..12).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|&x| 3.0 - 2.0 * x + 0.5 * x * x).collect();

        let poly = polyfit(&xs, &ys, 2).expect("fit");
        for &x in &xs {
            let expected = 3.0 - 2.0 * x + 0.5 * x * x;
            assert!(
                (poly.eval(x) - expected).abs() < 1e-8,
                "residual too large at x={x}"
            );
        }
    }

    #[test]
    fn clamps_degree_for_short_series() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [1.0, 2.0, 3.0];
        let poly = polyfit(&xs, &ys, TREND_DEGREE).expect("fit");
        assert_eq!(poly.degree(), 2);
        assert!((poly.eval(1.0) - 2.0).abs() < 1e-8);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        assert!(matches!(
            polyfit(&[0.0, 1.0], &[0.0], 1),
            Err(FitError::LengthMismatch { xs: 2, ys: 1 })
        ));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(polyfit(&[], &[], 3), Err(FitError::EmptySeries)));
    }

    #[test]
    fn horner_evaluation_matches_monomials() {
        let poly = Polynomial {
            coeffs: vec![1.0, 0.0, -4.0, 2.0],
        };
        // 1 - 4x^2 + 2x^3 at x = 3 → 1 - 36 + 54 = 19
        assert!((poly.eval(3.0) - 19.0).abs() < 1e-12);
    }

    #[test]
    fn trend_sampling_spans_the_data() {
        let xs: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|&x| 2.0 * x).collect();

        let curve = sample_trend(&xs, &ys).expect("trend");
        assert_eq!(curve.len(), TREND_SAMPLES);
        assert!((curve.first().unwrap()[0] - 0.0).abs() < 1e-12);
        assert!((curve.last().unwrap()[0] - 9.0).abs() < 1e-12);
        // Linear data is reproduced exactly by the clamped fit.
        assert!((curve.last().unwrap()[1] - 18.0).abs() < 1e-6);
    }
}
