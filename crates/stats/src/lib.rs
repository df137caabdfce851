//! Statistical helper functions for marine climate indicators.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator (matching pandas `std()**2`).
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Sample standard deviation, or `None` when it is undefined (fewer than
/// 2 elements).
pub fn sample_sd(data: &[f64]) -> Option<f64> {
    (data.len() >= 2).then(|| sd(data))
}

/// Linear-interpolation quantile between order statistics (R type 7,
/// pandas `interpolation="linear"`).
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type7: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = (h.floor() as usize).min(n - 1);
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Returns the finite values of `data` sorted ascending.
///
/// NaN and infinite entries are treated as missing and dropped.
pub fn finite_sorted(data: &[f64]) -> Vec<f64> {
    let mut values: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
    values.sort_by(f64::total_cmp);
    values
}

/// Root-mean-square of paired differences `a[i] - b[i]`.
///
/// Only pairs where both values are finite contribute. Returns `None` when
/// no such pair exists.
pub fn rmse(pairs: impl IntoIterator<Item = (f64, f64)>) -> Option<f64> {
    let mut sum_sq = 0.0;
    let mut n = 0usize;
    for (a, b) in pairs {
        if a.is_finite() && b.is_finite() {
            let d = a - b;
            sum_sq += d * d;
            n += 1;
        }
    }
    (n > 0).then(|| (sum_sq / n as f64).sqrt())
}
