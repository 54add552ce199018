/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the population variance given a pre-computed mean.
/// Returns 0.0 for empty input.
pub fn variance(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Computes the population standard deviation given a pre-computed mean.
/// Returns 0.0 for empty input.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    variance(values, mean).sqrt()
}

/// Mean of integer scores, `None` when there are none.
pub fn mean_score<I>(scores: I) -> Option<f64>
where
    I: IntoIterator<Item = u32>,
{
    let (sum, count) = scores
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), s| (sum + f64::from(s), count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_and_stddev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values);
        assert_eq!(m, 5.0);
        assert_eq!(variance(&values, m), 4.0);
        assert_eq!(stddev(&values, m), 2.0);
    }

    #[test]
    fn test_mean_score() {
        assert_eq!(mean_score(Vec::<u32>::new()), None);
        assert_eq!(mean_score([10, 20, 30]), Some(20.0));
    }
}
