//! Least-squares polynomial fitting.
//!
//! Solves the Vandermonde system through an SVD, so a rank-deficient window
//! is detected from its singular values instead of failing mid-solve.

use nalgebra::{DMatrix, DVector};

use crate::error::{MonitorError, Result};

// Relative threshold below which a singular value counts as zero
const RANK_EPSILON: f64 = 1e-12;

// Slopes this small relative to the window magnitude are rounding noise
const SLOPE_EPSILON: f64 = 1e-12;

/// Fits `ys ≈ c0 + c1*x + ... + cd*x^d` and returns `[c0, c1, ..., cd]`
/// (ascending powers).
pub fn polyfit(xs: &[f64], ys: &[f64], degree: usize) -> Result<Vec<f64>> {
    if xs.len() != ys.len() {
        return Err(MonitorError::InvalidConfig(format!(
            "x and y must have the same length ({} != {})",
            xs.len(),
            ys.len()
        )));
    }

    let rows = ys.len();
    let cols = degree + 1;
    let underdetermined = MonitorError::InsufficientWindow {
        len: rows,
        required: cols,
    };
    if rows < cols {
        return Err(underdetermined);
    }

    let vandermonde = DMatrix::<f64>::from_fn(rows, cols, |i, j| xs[i].powi(j as i32));
    let b = DVector::<f64>::from_column_slice(ys);

    let svd = vandermonde.svd(true, true);
    let largest = svd.singular_values.max();
    let eps = RANK_EPSILON * largest;
    if largest == 0.0 || svd.rank(eps) < cols {
        return Err(underdetermined);
    }

    let coeffs = svd.solve(&b, eps).map_err(|_| underdetermined)?;
    Ok(coeffs.iter().copied().collect())
}

/// Linear coefficient of a degree-`degree` fit over x = 1..=n.
///
/// Values within rounding noise of zero, relative to the largest value in the
/// window, are reported as exactly zero so a flat window classifies as stable.
pub fn slope(window: &[f64], degree: usize) -> Result<f64> {
    let xs: Vec<f64> = (1..=window.len()).map(|x| x as f64).collect();
    let coeffs = polyfit(&xs, window, degree)?;

    let magnitude = window.iter().fold(0.0_f64, |acc, y| acc.max(y.abs()));
    if coeffs[1].abs() <= SLOPE_EPSILON * magnitude {
        return Ok(0.0);
    }
    Ok(coeffs[1])
}
