//! Direct tridiagonal solver (Thomas algorithm)
//!
//! Forward elimination followed by back substitution, `O(n)` per line. No
//! pivoting: the ADI systems built from `alpha * dt / dx² > 0` are strictly
//! diagonally dominant, so the pivots cannot vanish.

/// Solve a tridiagonal system `A x = rhs`.
///
/// All four slices have the same length `n`. Row `i` of `A` holds
/// `lower[i]` on the subdiagonal, `diag[i]` on the diagonal and `upper[i]`
/// on the superdiagonal; `lower[0]` and `upper[n-1]` are ignored.
pub fn solve(lower: &[f64], diag: &[f64], upper: &[f64], rhs: &[f64]) -> Vec<f64> {
    let n = diag.len();
    assert!(n >= 2, "tridiagonal system needs at least 2 rows");
    assert!(
        lower.len() == n && upper.len() == n && rhs.len() == n,
        "coefficient slices must share the system size"
    );

    let mut b = diag.to_vec();
    let mut d = rhs.to_vec();

    // Forward elimination
    for i in 1..n {
        let m = lower[i] / b[i - 1];
        b[i] -= m * upper[i - 1];
        d[i] -= m * d[i - 1];
    }

    // Back substitution
    let mut x = vec![0.0; n];
    x[n - 1] = d[n - 1] / b[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = (d[i] - upper[i] * x[i + 1]) / b[i];
    }
    x
}

/// Multiply a tridiagonal matrix by a vector, `A * x`.
///
/// Used by tests to round-trip [`solve`] and by nothing on the hot path.
pub fn multiply(lower: &[f64], diag: &[f64], upper: &[f64], x: &[f64]) -> Vec<f64> {
    let n = diag.len();
    (0..n)
        .map(|i| {
            let mut v = diag[i] * x[i];
            if i > 0 {
                v += lower[i] * x[i - 1];
            }
            if i + 1 < n {
                v += upper[i] * x[i + 1];
            }
            v
        })
        .collect()
}
