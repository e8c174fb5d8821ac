// Simple ordinary-least-squares fit of one variable on another, via the
// closed-form normal-equations solution.
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FitError {
    #[error("regression needs at least 2 samples, got {0}")]
    TooFewSamples(usize),
    #[error("sample length mismatch: {x} x-values vs {y} y-values")]
    LengthMismatch { x: usize, y: usize },
    #[error("predictor has zero variance; slope is undefined")]
    ConstantPredictor,
}

/// A fitted line `y = intercept + slope * x` with its coefficient standard
/// errors and coefficient of determination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
    pub std_err_intercept: f64,
    pub std_err_slope: f64,
    pub r_squared: f64,
    pub samples: usize,
}

impl LinearFit {
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self, FitError> {
        if xs.len() != ys.len() {
            return Err(FitError::LengthMismatch {
                x: xs.len(),
                y: ys.len(),
            });
        }
        let n = xs.len();
        if n < 2 {
            return Err(FitError::TooFewSamples(n));
        }
        let nf = n as f64;
        let mean_x = xs.iter().sum::<f64>() / nf;
        let mean_y = ys.iter().sum::<f64>() / nf;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (x, y) in xs.iter().zip(ys) {
            sxx += (x - mean_x) * (x - mean_x);
            sxy += (x - mean_x) * (y - mean_y);
        }
        if sxx == 0.0 {
            return Err(FitError::ConstantPredictor);
        }
        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;

        let mut ss_res = 0.0;
        let mut ss_tot = 0.0;
        for (x, y) in xs.iter().zip(ys) {
            let resid = y - (intercept + slope * x);
            ss_res += resid * resid;
            ss_tot += (y - mean_y) * (y - mean_y);
        }
        // With zero y-variance an exact constant fit explains everything;
        // anything else explains nothing. Avoids 0/0.
        let r_squared = if ss_tot == 0.0 {
            if ss_res == 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            1.0 - ss_res / ss_tot
        };

        // Exact two-point fits leave zero residual degrees of freedom; the
        // standard errors are reported as 0 instead of NaN.
        let dof = n.saturating_sub(2);
        let (std_err_slope, std_err_intercept) = if dof == 0 {
            (0.0, 0.0)
        } else {
            let sigma2 = ss_res / dof as f64;
            (
                (sigma2 / sxx).sqrt(),
                (sigma2 * (1.0 / nf + mean_x * mean_x / sxx)).sqrt(),
            )
        };

        Ok(LinearFit {
            intercept,
            slope,
            std_err_intercept,
            std_err_slope,
            r_squared,
            samples: n,
        })
    }

    /// Point prediction for any `x`, in or out of the fitted range.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}
