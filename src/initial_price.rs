//! Initial Price Level
//!
//! For a steady state with inflation `pi_bar` to start at `t = 0`, the
//! initial price level must satisfy
//!
//! ```text
//! log(exp(m0) + g exp(p0)) + alpha * pi_bar - p0 = 0
//! ```
//!
//! i.e. next period's money stock must already sit at the demanded level.
//! Solved numerically for `p0`.

use crate::error::{ModelError, Result};
use crate::params::ModelParams;
use crate::solver::{newton, RootSummary, SolverOptions};

pub const INITIAL_PRICE_TOLERANCE: f64 = 1e-13;

/// Residual of the initial-price equation, written as
/// `m0 + ln(1 + g exp(p0 - m0)) + alpha pi_bar - p0` so large `p0` stays finite.
pub fn initial_price_residual(params: &ModelParams, pi_bar: f64, p0: f64) -> f64 {
    let m0 = params.m0();
    m0 + (params.g() * (p0 - m0).exp()).ln_1p() + params.alpha() * pi_bar - p0
}

pub fn solve_p0(params: &ModelParams, pi_bar: f64, guess: f64, tolerance: f64) -> Result<RootSummary> {
    // The residual tends to ln(g) + alpha pi_bar as p0 grows; a root needs it negative.
    if (-params.alpha() * pi_bar).exp() <= params.g() {
        return Err(ModelError::NoInitialPrice { pi_bar });
    }

    let options = SolverOptions::with_tolerance(tolerance);
    newton(|p0| initial_price_residual(params, pi_bar, p0), guess, &options)
}

/// Initial price for `pi_bar`, starting the search at `m0`.
pub fn initial_price(params: &ModelParams, pi_bar: f64) -> Result<f64> {
    Ok(solve_p0(params, pi_bar, params.m0(), INITIAL_PRICE_TOLERANCE)?.root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steady_state::default_steady_states;
    use approx::assert_abs_diff_eq;

    fn closed_form(params: &ModelParams, pi_bar: f64) -> f64 {
        params.m0() - ((-params.alpha() * pi_bar).exp() - params.g()).ln()
    }

    #[test]
    fn test_matches_closed_form() {
        let params = ModelParams::default();
        let states = default_steady_states(&params).unwrap();

        for pi in states.rates() {
            let p0 = initial_price(&params, pi).unwrap();
            assert_abs_diff_eq!(p0, closed_form(&params, pi), epsilon = 1e-10);
            assert!(initial_price_residual(&params, pi, p0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_high_inflation_needs_higher_price() {
        let params = ModelParams::default();
        let states = default_steady_states(&params).unwrap();

        let p0_l = initial_price(&params, states.low).unwrap();
        let p0_u = initial_price(&params, states.high).unwrap();

        assert!(p0_l > params.m0());
        assert!(p0_u > p0_l);
        assert_abs_diff_eq!(p0_l, 5.615_742_247_288, epsilon = 1e-9);
        assert_abs_diff_eq!(p0_u, 7.144_789_784_380, epsilon = 1e-9);
    }

    #[test]
    fn test_guess_far_above_root() {
        let params = ModelParams::default();
        let states = default_steady_states(&params).unwrap();
        let summary = solve_p0(&params, states.low, params.m0() + 3.0, INITIAL_PRICE_TOLERANCE).unwrap();

        assert_abs_diff_eq!(summary.root, closed_form(&params, states.low), epsilon = 1e-10);
    }

    #[test]
    fn test_unsupported_rate_rejected() {
        let params = ModelParams::default();
        // exp(-0.5 * 3) = 0.223 < g
        assert!(matches!(
            initial_price(&params, 3.0),
            Err(ModelError::NoInitialPrice { .. })
        ));
    }
}
