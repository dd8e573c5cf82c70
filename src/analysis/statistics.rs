use statrs::statistics::Statistics;

use crate::error::EstimatorError;
use crate::models::{HeightDistribution, StatSummary};

/// Summarize a height-sample array.
///
/// Empty input is the no-data case, not an error. Percentiles use linear
/// interpolation between order statistics (rank `r = p/100 · (n-1)`),
/// matching the reference implementation the equation was calibrated
/// against. Kurtosis is the population excess kurtosis `m4/m2^2 - 3`,
/// without bias correction; a zero-variance sample makes it undefined and
/// is reported as a math domain error.
pub fn summarize(heights: &[f64]) -> Result<StatSummary, EstimatorError> {
    if heights.is_empty() {
        return Ok(StatSummary::no_data());
    }

    let mut sorted = heights.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mean = heights.mean();
    let p25 = percentile_sorted(&sorted, 25.0);
    let p75 = percentile_sorted(&sorted, 75.0);

    Ok(StatSummary {
        count: heights.len(),
        distribution: Some(HeightDistribution {
            mean,
            p5: percentile_sorted(&sorted, 5.0),
            p10: percentile_sorted(&sorted, 10.0),
            p25,
            p75,
            p100: sorted[sorted.len() - 1],
            iqr: p75 - p25,
            kurtosis: excess_kurtosis(heights, mean)?,
        }),
    })
}

/// Interpolated percentile of an ascending-sorted, non-empty slice.
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let fraction = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * fraction
}

fn excess_kurtosis(heights: &[f64], mean: f64) -> Result<f64, EstimatorError> {
    let m2 = heights.population_variance();
    if m2 <= 0.0 {
        return Err(EstimatorError::DomainMath(
            "kurtosis is undefined for a zero-variance height sample".to_string(),
        ));
    }
    let n = heights.len() as f64;
    let m4 = heights.iter().map(|h| (h - mean).powi(4)).sum::<f64>() / n;
    Ok(m4 / (m2 * m2) - 3.0)
}
