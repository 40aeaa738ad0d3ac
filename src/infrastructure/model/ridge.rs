//! Closed-form ridge regression with an unpenalised intercept.
//!
//! Minimises `||y - Xβ - b||² + α||β||²` by centring `X` and `y` and
//! solving `(X'X + αI) β = X'y` with a Cholesky factorisation.

use ndarray::{Array1, Array2, Axis};

use crate::domain::error::DomainError;

/// Added to the diagonal so an exactly collinear design with α = 0 still factorises.
const JITTER: f64 = 1e-10;

#[derive(Debug, Clone)]
pub struct RidgeFit {
    pub coefficients: Array1<f64>,
    pub intercept: f64,
    /// `None` when `y` has no variance.
    pub r_squared: Option<f64>,
}

impl RidgeFit {
    pub fn predict_row(&self, x: &[f64]) -> f64 {
        self.intercept + self.coefficients.iter().zip(x).map(|(b, v)| b * v).sum::<f64>()
    }
}

pub fn fit(x: &Array2<f64>, y: &Array1<f64>, alpha: f64) -> Result<RidgeFit, DomainError> {
    if x.nrows() != y.len() {
        return Err(DomainError::Estimation(format!(
            "Dimension mismatch: {} rows of features, {} targets",
            x.nrows(),
            y.len()
        )));
    }
    if x.nrows() == 0 {
        return Err(DomainError::Estimation("No observations to fit".into()));
    }
    if !alpha.is_finite() || alpha < 0.0 {
        return Err(DomainError::Estimation(format!("Invalid alpha: {alpha}")));
    }

    let x_mean = x
        .mean_axis(Axis(0))
        .ok_or_else(|| DomainError::Estimation("Cannot average features".into()))?;
    let y_mean = y
        .mean()
        .ok_or_else(|| DomainError::Estimation("Cannot average target".into()))?;
    let xc = x - &x_mean;
    let yc = y - y_mean;

    let mut xtx = xc.t().dot(&xc);
    for i in 0..xtx.nrows() {
        xtx[[i, i]] += alpha + JITTER;
    }
    let xty = xc.t().dot(&yc);

    let coefficients = cholesky_solve(&xtx, &xty)?;
    let intercept = y_mean - x_mean.dot(&coefficients);

    let fitted = x.dot(&coefficients) + intercept;
    let ss_tot: f64 = yc.iter().map(|v| v * v).sum();
    let ss_res: f64 = y
        .iter()
        .zip(fitted.iter())
        .map(|(yi, fi)| (yi - fi).powi(2))
        .sum();
    let r_squared = (ss_tot > 0.0).then(|| 1.0 - ss_res / ss_tot);

    Ok(RidgeFit {
        coefficients,
        intercept,
        r_squared,
    })
}

fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, DomainError> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for j in 0..=i {
            let sum: f64 = (0..j).map(|k| l[[i, k]] * l[[j, k]]).sum();
            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= 0.0 || !diag.is_finite() {
                    return Err(DomainError::Estimation(
                        "Normal equations are singular; increase ridge alpha".into(),
                    ));
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // L z = b
    let mut z = Array1::<f64>::zeros(n);
    for i in 0..n {
        let sum: f64 = (0..i).map(|j| l[[i, j]] * z[j]).sum();
        z[i] = (b[i] - sum) / l[[i, i]];
    }

    // L' x = z
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let sum: f64 = ((i + 1)..n).map(|j| l[[j, i]] * x[j]).sum();
        x[i] = (z[i] - sum) / l[[i, i]];
    }

    Ok(x)
}
