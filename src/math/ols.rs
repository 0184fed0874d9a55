//! Least squares on small dense systems.
//!
//! Used for the temperature/load trend line:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! with `x_i = [1, t_i, t_i^2, ...]`. We solve through SVD so tall design
//! matrices (many hours, three columns) work without forming normal equations.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Progressively looser tolerances if a strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Vandermonde design matrix with columns `1, x, ..., x^degree`.
pub fn polynomial_design(xs: &[f64], degree: usize) -> DMatrix<f64> {
    DMatrix::from_fn(xs.len(), degree + 1, |i, j| xs[i].powi(j as i32))
}

/// Fit `y = c0 + c1·x + ... + cd·x^d`; coefficients in ascending order.
///
/// `None` when there are fewer distinct `x` values than coefficients, or the
/// solve fails.
pub fn fit_polynomial(xs: &[f64], ys: &[f64], degree: usize) -> Option<Vec<f64>> {
    if xs.len() != ys.len() || distinct_count(xs) <= degree {
        return None;
    }
    let x = polynomial_design(xs, degree);
    let y = DVector::from_column_slice(ys);
    solve_least_squares(&x, &y).map(|beta| beta.iter().copied().collect())
}

/// Evaluate ascending-order coefficients at `x` (Horner).
pub fn eval_polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

fn distinct_count(xs: &[f64]) -> usize {
    let mut sorted: Vec<f64> = xs.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}
