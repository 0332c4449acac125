//! Stationary Inflation Rates
//!
//! In a steady state money and prices grow at a common rate `x`, and the
//! deficit must be covered by seigniorage:
//!
//! ```text
//! exp(-alpha x) - exp(-(1 + alpha) x) = g
//! ```
//!
//! The left side is the stationary Laffer curve. It rises from zero, peaks
//! at `x* = -ln(lambda)` and decays again, so any feasible `g` below the peak
//! is raised at exactly two inflation rates: a low one on the rising side
//! and a high one on the falling side.

use log::info;
use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::params::ModelParams;
use crate::solver::{bisect, newton, RootSummary, SolverOptions};

pub const DEFAULT_LOW_GUESS: f64 = 0.6;
pub const DEFAULT_HIGH_GUESS: f64 = 3.0;
pub const STEADY_STATE_TOLERANCE: f64 = 1e-10;

/// The two stationary inflation rates, `low < high`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SteadyStates {
    pub low: f64,
    pub high: f64,
}

impl SteadyStates {
    pub fn rates(&self) -> [f64; 2] {
        [self.low, self.high]
    }
}

/// Residual of the steady-state equation at inflation rate `x`.
pub fn steady_state_residual(params: &ModelParams, x: f64) -> f64 {
    params.seigniorage(x) - params.g()
}

/// Solves the steady-state equation from a single starting guess.
///
/// The guess decides which of the two roots is found. No feasibility check
/// is made here; an infeasible `g` surfaces as `NoConvergence`.
pub fn solve_pi(params: &ModelParams, guess: f64, tolerance: f64) -> Result<RootSummary> {
    let options = SolverOptions::with_tolerance(tolerance);
    let summary = newton(|x| steady_state_residual(params, x), guess, &options)?;

    if summary.root <= 0.0 {
        return Err(ModelError::NoConvergence {
            iterations: summary.iterations,
            last: summary.root,
            residual: summary.residual,
        });
    }

    Ok(summary)
}

/// Solves for both steady states from a low and a high guess.
pub fn solve_steady_states(
    params: &ModelParams,
    low_guess: f64,
    high_guess: f64,
    tolerance: f64,
) -> Result<SteadyStates> {
    require_positive_deficit(params)?;
    params.check_feasible()?;

    let a = solve_pi(params, low_guess, tolerance)?.root;
    let b = solve_pi(params, high_guess, tolerance)?.root;
    let (low, high) = if a <= b { (a, b) } else { (b, a) };

    let at_peak = params.g() >= params.max_seigniorage() - tolerance;
    if !at_peak && (high - low).abs() <= tolerance.sqrt() * high.max(1.0) {
        return Err(ModelError::DuplicateRoot { root: low });
    }

    info!("steady states for g = {}: pi_l = {low:.10}, pi_u = {high:.10}", params.g());
    Ok(SteadyStates { low, high })
}

/// With `g <= 0` the high-inflation root runs off to infinity.
fn require_positive_deficit(params: &ModelParams) -> Result<()> {
    if params.g() <= 0.0 {
        return Err(ModelError::InvalidParameter(
            "g must be positive for a finite high-inflation steady state".to_string(),
        ));
    }
    Ok(())
}

/// [`solve_steady_states`] with the default guesses (0.6 and 3.0).
pub fn default_steady_states(params: &ModelParams) -> Result<SteadyStates> {
    solve_steady_states(params, DEFAULT_LOW_GUESS, DEFAULT_HIGH_GUESS, STEADY_STATE_TOLERANCE)
}

/// Finds both steady states by bisection on either side of the Laffer peak.
///
/// Does not depend on starting guesses.
pub fn bracket_steady_states(params: &ModelParams, tolerance: f64) -> Result<SteadyStates> {
    require_positive_deficit(params)?;
    params.check_feasible()?;

    let options = SolverOptions::with_tolerance(tolerance);
    let residual = |x: f64| steady_state_residual(params, x);
    let peak = params.revenue_maximizing_rate();

    // At the top of the Laffer curve both roots merge into the peak.
    if residual(peak) <= tolerance {
        info!("g = {} sits at the Laffer peak, single steady state {peak:.10}", params.g());
        return Ok(SteadyStates { low: peak, high: peak });
    }

    let low = bisect(residual, 0.0, peak, &options)?.root;

    let mut upper = 2.0 * peak;
    while residual(upper) > 0.0 {
        upper *= 2.0;
        if !upper.is_finite() {
            return Err(ModelError::InvalidBracket { lo: peak, hi: upper });
        }
    }
    let high = bisect(residual, peak, upper, &options)?.root;

    Ok(SteadyStates { low, high })
}

/// Samples the stationary Laffer curve on `[0, upper]`.
pub fn laffer_curve(params: &ModelParams, upper: f64, points: usize) -> Vec<(f64, f64)> {
    if points < 2 {
        return vec![(0.0, params.seigniorage(0.0))];
    }
    let step = upper / (points - 1) as f64;
    (0..points)
        .map(|i| {
            let x = i as f64 * step;
            (x, params.seigniorage(x))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const REFERENCE_PI_LOW: f64 = 0.673_714_707_533;
    const REFERENCE_PI_HIGH: f64 = 1.693_079_732_261;

    #[test]
    fn test_reference_roots() {
        let params = ModelParams::default();
        let low = solve_pi(&params, 0.6, STEADY_STATE_TOLERANCE).unwrap();
        let high = solve_pi(&params, 3.0, STEADY_STATE_TOLERANCE).unwrap();

        assert_abs_diff_eq!(low.root, REFERENCE_PI_LOW, epsilon = 1e-12);
        assert_abs_diff_eq!(high.root, REFERENCE_PI_HIGH, epsilon = 1e-12);
    }

    #[test]
    fn test_roots_satisfy_equation() {
        let params = ModelParams::default();
        let states = default_steady_states(&params).unwrap();

        assert!(states.low > 0.0);
        assert!(states.high > states.low);
        for pi in states.rates() {
            assert!(steady_state_residual(&params, pi).abs() < 1e-8);
        }
    }

    #[test]
    fn test_roots_straddle_peak() {
        let params = ModelParams::default();
        let states = default_steady_states(&params).unwrap();
        let peak = params.revenue_maximizing_rate();

        assert!(states.low < peak && peak < states.high);
    }

    #[test]
    fn test_bracketing_agrees_with_newton() {
        let params = ModelParams::default();
        let newton_states = default_steady_states(&params).unwrap();
        let bracketed = bracket_steady_states(&params, 1e-13).unwrap();

        assert_abs_diff_eq!(newton_states.low, bracketed.low, epsilon = 1e-9);
        assert_abs_diff_eq!(newton_states.high, bracketed.high, epsilon = 1e-9);
    }

    #[test]
    fn test_infeasible_deficit_rejected() {
        let params = ModelParams::default().with_g(0.40).unwrap();

        assert!(matches!(
            default_steady_states(&params),
            Err(ModelError::InfeasibleDeficit { .. })
        ));
        assert!(matches!(
            bracket_steady_states(&params, 1e-10),
            Err(ModelError::InfeasibleDeficit { .. })
        ));
    }

    #[test]
    fn test_bracketing_at_laffer_peak() {
        let base = ModelParams::default();
        let params = base.with_g(base.max_seigniorage()).unwrap();
        let peak = params.revenue_maximizing_rate();

        let bracketed = bracket_steady_states(&params, STEADY_STATE_TOLERANCE).unwrap();
        assert_eq!(bracketed.low, peak);
        assert_eq!(bracketed.high, peak);

        let newton_states = default_steady_states(&params).unwrap();
        assert_abs_diff_eq!(newton_states.low, peak, epsilon = 1e-4);
        assert_abs_diff_eq!(newton_states.high, peak, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_deficit_rejected_by_both_solvers() {
        let params = ModelParams::default().with_g(0.0).unwrap();

        assert!(matches!(
            default_steady_states(&params),
            Err(ModelError::InvalidParameter(_))
        ));
        assert!(matches!(
            bracket_steady_states(&params, STEADY_STATE_TOLERANCE),
            Err(ModelError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_same_side_guesses_detected() {
        let params = ModelParams::default();
        let result = solve_steady_states(&params, 0.5, 0.7, STEADY_STATE_TOLERANCE);
        assert!(matches!(result, Err(ModelError::DuplicateRoot { .. })));
    }

    #[test]
    fn test_comparative_statics() {
        let base = ModelParams::default();
        let grid = [0.30, 0.32, 0.34, 0.35, 0.36, 0.38];

        let states: Vec<SteadyStates> = grid
            .iter()
            .map(|&g| bracket_steady_states(&base.with_g(g).unwrap(), 1e-12).unwrap())
            .collect();

        for pair in states.windows(2) {
            let (before, after) = (pair[0], pair[1]);
            assert!(!(after.low > before.low && after.high > before.high));
            assert!(after.low > before.low);
            assert!(after.high < before.high);
            assert!(after.high - after.low < before.high - before.low);
        }
    }

    #[test]
    fn test_laffer_curve_shape() {
        let params = ModelParams::default();
        let curve = laffer_curve(&params, 5.0, 501);

        assert_eq!(curve.len(), 501);
        assert_abs_diff_eq!(curve[0].1, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(curve[500].0, 5.0, epsilon = 1e-12);

        let (argmax, max) = curve
            .iter()
            .cloned()
            .fold((0.0, f64::MIN), |best, point| if point.1 > best.1 { point } else { best });
        assert!((argmax - params.revenue_maximizing_rate()).abs() < 0.01);
        assert!(max <= params.max_seigniorage() + 1e-12);
    }
}
