//! Univariate ordinary least squares.
//!
//! All functions here are pure and hold no state, so they can be called from
//! any number of threads on shared column views.

use crate::types::RegressionResult;
use ndarray::ArrayView1;

/// Fit `y ≈ intercept + slope * x` and compute its R².
///
/// # Panics
///
/// Panics if `x` and `y` have different lengths.
pub fn fit(x_name: &str, x: &ArrayView1<f64>, y: &ArrayView1<f64>) -> RegressionResult {
    let (intercept, slope) = linear_regression(x, y);
    let r_squared = r_squared(x, y, intercept, slope);
    RegressionResult {
        x_name: x_name.to_string(),
        intercept,
        slope,
        r_squared,
    }
}

/// Unweighted least squares intercept and slope, not forced through the origin.
///
/// Returns `(NaN, NaN)` when `x` is empty or constant, since the slope is
/// undefined there.
///
/// # Panics
///
/// Panics if `x` and `y` have different lengths.
pub fn linear_regression(x: &ArrayView1<f64>, y: &ArrayView1<f64>) -> (f64, f64) {
    check_lengths(x, y);
    if x.is_empty() || is_constant(x) {
        return (f64::NAN, f64::NAN);
    }

    let n = x.len() as f64;
    let x_mean = x.sum() / n;
    let y_mean = y.sum() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - x_mean;
        sxx += dx * dx;
        sxy += dx * (yi - y_mean);
    }

    let slope = sxy / sxx;
    // Distinct values whose spread underflows still leave sxx at zero.
    if sxx == 0.0 || !slope.is_finite() {
        return (f64::NAN, f64::NAN);
    }
    let intercept = y_mean - slope * x_mean;
    (intercept, slope)
}

/// Coefficient of determination of the line `intercept + slope * x` against `y`.
///
/// Returns NaN when `y` is empty or constant (total sum of squares is zero),
/// or when the coefficients themselves are NaN.
///
/// # Panics
///
/// Panics if `x` and `y` have different lengths.
pub fn r_squared(x: &ArrayView1<f64>, y: &ArrayView1<f64>, intercept: f64, slope: f64) -> f64 {
    check_lengths(x, y);
    if y.is_empty() || is_constant(y) || intercept.is_nan() || slope.is_nan() {
        return f64::NAN;
    }

    let y_mean = y.sum() / y.len() as f64;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let residual = yi - (intercept + slope * xi);
        ss_res += residual * residual;
        let dev = yi - y_mean;
        ss_tot += dev * dev;
    }

    if ss_tot == 0.0 {
        return f64::NAN;
    }
    1.0 - ss_res / ss_tot
}

fn check_lengths(x: &ArrayView1<f64>, y: &ArrayView1<f64>) {
    assert_eq!(
        x.len(),
        y.len(),
        "predictor and response must have the same length"
    );
}

// Exact equality: a constant column has zero variance regardless of rounding
// in its mean.
fn is_constant(values: &ArrayView1<f64>) -> bool {
    let mut iter = values.iter();
    match iter.next() {
        Some(&first) => iter.all(|&v| v == first),
        None => true,
    }
}
