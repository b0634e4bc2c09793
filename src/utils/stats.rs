/// Largest magnitude in `values`; dividing by it keeps sums from overflowing.
fn magnitude(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

pub fn is_flat(values: &[f64]) -> bool {
    values.iter().all(|v| *v == values[0])
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let scale = magnitude(values);
    if scale == 0.0 {
        return Some(0.0);
    }
    let scaled: f64 = values.iter().map(|v| v / scale).sum::<f64>() / values.len() as f64;
    Some(scaled * scale)
}

/// Bessel-corrected standard deviation (divisor `n - 1`).
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    if is_flat(values) {
        return Some(0.0);
    }
    let scale = magnitude(values);
    Some(scaled_spread(values, scale).1 * scale)
}

/// Standard score of `x` against `population`; `None` when there is no spread to divide by.
pub fn z_score(x: f64, population: &[f64]) -> Option<f64> {
    if population.len() < 2 || is_flat(population) {
        return None;
    }
    let scale = magnitude(population).max(x.abs());
    let (mean, std_dev) = scaled_spread(population, scale);
    if std_dev == 0.0 {
        return None;
    }
    Some((x / scale - mean) / std_dev)
}

/// Mean and sample standard deviation of `values / scale`.
fn scaled_spread(values: &[f64], scale: f64) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().map(|v| v / scale).sum::<f64>() / n;
    let sum_sq: f64 = values.iter().map(|v| (v / scale - mean).powi(2)).sum();
    (mean, (sum_sq / (n - 1.0)).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_std_dev_uses_n_minus_one() {
        let sd = sample_std_dev(&[50.0, 60.0, 70.0, 80.0]).unwrap();
        assert!((sd - 12.9099).abs() < 1e-4);
    }

    #[test]
    fn too_few_values() {
        assert_eq!(mean(&[]), None);
        assert_eq!(sample_std_dev(&[3.0]), None);
        assert_eq!(z_score(3.0, &[3.0]), None);
    }

    #[test]
    fn flat_values_have_zero_spread() {
        assert_eq!(sample_std_dev(&[40.0, 40.0, 40.0]), Some(0.0));
        assert_eq!(sample_std_dev(&[0.7; 7]), Some(0.0));
        assert_eq!(z_score(0.7, &[0.7; 7]), None);
    }

    #[test]
    fn z_score_matches_textbook_formula() {
        let z = z_score(80.0, &[50.0, 60.0, 70.0, 80.0]).unwrap();
        assert!((z - 1.16190).abs() < 1e-4);
    }

    #[test]
    fn huge_values_do_not_overflow() {
        let m = mean(&[1e308, 1.7e308]).unwrap();
        assert!(m.is_finite());
        assert!((m - 1.35e308).abs() / 1.35e308 < 1e-12);

        let z = z_score(1e308, &[1e308, 1e308, -1e308]).unwrap();
        assert!(z.is_finite());
        assert!(z > 0.0);
    }
}
