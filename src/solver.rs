//! Scalar Root Finding
//!
//! The model only ever solves one equation in one unknown:
//!
//! - `newton`: Newton iteration with a central-difference
//!   derivative, started from a caller-supplied guess. Which root it finds
//!   depends on the guess, which is how the two steady states are told apart.
//! - `bisect`: bracketing bisection for when a sign change is known.
//!
//! Both return an error instead of a best-effort value when they fail.

use log::{debug, warn};

use crate::error::{ModelError, Result};

/// Configuration for a root-finding run.
#[derive(Clone, Debug)]
pub struct SolverOptions {
    /// Relative step tolerance: stop once `|dx| <= tolerance * max(1, |x|)`.
    pub tolerance: f64,
    /// Maximum number of iterations before giving up.
    pub max_iterations: usize,
    /// Relative width of the central-difference stencil.
    pub derivative_step: f64,
}

impl SolverOptions {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 200,
            derivative_step: 1e-6,
        }
    }
}

/// A converged root with diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootSummary {
    pub root: f64,
    pub iterations: usize,
    /// Residual evaluated at `root`.
    pub residual: f64,
}

fn central_difference(f: &impl Fn(f64) -> f64, x: f64, step: f64) -> f64 {
    let h = step * x.abs().max(1.0);
    (f(x + h) - f(x - h)) / (2.0 * h)
}

pub fn newton(f: impl Fn(f64) -> f64, guess: f64, options: &SolverOptions) -> Result<RootSummary> {
    let mut x = guess;
    let mut fx = f(x);

    for iteration in 1..=options.max_iterations {
        if fx == 0.0 {
            return Ok(RootSummary {
                root: x,
                iterations: iteration - 1,
                residual: fx,
            });
        }

        let slope = central_difference(&f, x, options.derivative_step);
        if !fx.is_finite() || !slope.is_finite() || slope == 0.0 {
            warn!("newton: degenerate step at x = {x} (f = {fx}, f' = {slope})");
            return Err(ModelError::NoConvergence {
                iterations: iteration,
                last: x,
                residual: fx,
            });
        }

        let dx = fx / slope;
        x -= dx;
        fx = f(x);

        if dx.abs() <= options.tolerance * x.abs().max(1.0) && fx.is_finite() {
            debug!("newton: converged to {x} in {iteration} iterations (residual {fx:e})");
            return Ok(RootSummary {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }
    }

    warn!(
        "newton: no convergence after {} iterations from guess {guess}",
        options.max_iterations
    );
    Err(ModelError::NoConvergence {
        iterations: options.max_iterations,
        last: x,
        residual: fx,
    })
}

pub fn bisect(f: impl Fn(f64) -> f64, lo: f64, hi: f64, options: &SolverOptions) -> Result<RootSummary> {
    let (mut lo, mut hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo == 0.0 {
        return Ok(RootSummary { root: lo, iterations: 0, residual: 0.0 });
    }
    if f_hi == 0.0 {
        return Ok(RootSummary { root: hi, iterations: 0, residual: 0.0 });
    }
    if !(f_lo.is_finite() && f_hi.is_finite()) || f_lo.signum() == f_hi.signum() {
        return Err(ModelError::InvalidBracket { lo, hi });
    }

    for iteration in 1..=options.max_iterations {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);

        if f_mid == 0.0 || (hi - lo) * 0.5 <= options.tolerance * mid.abs().max(1.0) {
            debug!("bisect: converged to {mid} in {iteration} iterations (residual {f_mid:e})");
            return Ok(RootSummary {
                root: mid,
                iterations: iteration,
                residual: f_mid,
            });
        }

        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    let mid = 0.5 * (lo + hi);
    warn!("bisect: bracket [{lo}, {hi}] still open after {} iterations", options.max_iterations);
    Err(ModelError::NoConvergence {
        iterations: options.max_iterations,
        last: mid,
        residual: f(mid),
    })
}
