//! Small, pure numeric helpers shared by every detector. Kept dependency
//! free (no `rand`, no RNG) so every detector stays a pure function of its
//! inputs (spec §4.2 "detectors must be pure").

/// Median of a slice of `f64`, `None` if empty. Sorts a copy; stable given
/// equal inputs because floating point comparisons of equal values are
/// equal regardless of original order.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation.
pub fn stdev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    if values.len() < 2 {
        return Some(0.0);
    }
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Coefficient of variation: `stdev / mean`. `None` when mean is zero or
/// there is no data, rather than producing `NaN` or `inf` (spec §4.2 "all
/// divisions guard against zero").
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    if m == 0.0 {
        return None;
    }
    stdev(values).map(|s| s / m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_even_count_averages_middle_two() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
    }

    #[test]
    fn median_of_empty_is_none() {
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn cv_of_constant_series_is_zero() {
        assert_eq!(coefficient_of_variation(&[5.0, 5.0, 5.0]), Some(0.0));
    }

    #[test]
    fn cv_guards_zero_mean() {
        assert_eq!(coefficient_of_variation(&[-1.0, 1.0]), None);
    }
}
