//! End-to-end checks of the model's equilibrium properties through the
//! public API.

use approx::assert_abs_diff_eq;
use laffer_simulation::initial_price::initial_price;
use laffer_simulation::params::ModelParams;
use laffer_simulation::steady_state::{
    bracket_steady_states, solve_pi, solve_steady_states, steady_state_residual,
    STEADY_STATE_TOLERANCE,
};
use laffer_simulation::sweep::{initial_price_grid, sweep, Attractor};
use laffer_simulation::trajectory::simulate;
use laffer_simulation::ModelError;

fn default_setup() -> (ModelParams, f64, f64, f64, f64) {
    let _ = env_logger::try_init();
    let params = ModelParams::from_money_level(0.5, 100.0, 0.35).unwrap();
    let states = solve_steady_states(&params, 0.6, 3.0, STEADY_STATE_TOLERANCE).unwrap();
    let p0_l = initial_price(&params, states.low).unwrap();
    let p0_u = initial_price(&params, states.high).unwrap();
    (params, states.low, states.high, p0_l, p0_u)
}

#[test]
fn two_positive_roots_solve_the_steady_state_equation() {
    let (params, pi_l, pi_u, _, _) = default_setup();

    assert!(0.0 < pi_l && pi_l < pi_u);
    assert!(steady_state_residual(&params, pi_l).abs() < 1e-8);
    assert!(steady_state_residual(&params, pi_u).abs() < 1e-8);
}

#[test]
fn reference_roots_reproduced() {
    let (params, _, _, _, _) = default_setup();

    let low = solve_pi(&params, 0.6, STEADY_STATE_TOLERANCE).unwrap().root;
    let high = solve_pi(&params, 3.0, STEADY_STATE_TOLERANCE).unwrap().root;

    assert_eq!(format!("{low:.10}"), "0.6737147075");
    assert_eq!(format!("{high:.10}"), "1.6930797323");
}

#[test]
fn steady_state_initial_prices_give_constant_inflation() {
    let (params, pi_l, pi_u, p0_l, p0_u) = default_setup();

    let high = simulate(p0_u, &params, 150).unwrap();
    for t in 0..high.len() {
        assert_abs_diff_eq!(high.pi[t], pi_u, epsilon = 1e-8);
        assert_abs_diff_eq!(high.mu[t], pi_u, epsilon = 1e-8);
    }

    let low = simulate(p0_l, &params, 30).unwrap();
    for t in 0..low.len() {
        assert_abs_diff_eq!(low.pi[t], pi_l, epsilon = 1e-8);
        assert_abs_diff_eq!(low.mu[t], pi_l, epsilon = 1e-8);
    }
}

#[test]
fn interior_initial_prices_converge_to_high_inflation() {
    let (params, pi_l, pi_u, p0_l, p0_u) = default_setup();
    let states = laffer_simulation::SteadyStates { low: pi_l, high: pi_u };

    let mut p0s = initial_price_grid(p0_l, p0_u, 0.05).unwrap();
    p0s.remove(0);
    p0s.push(p0_l + 1e-6);
    p0s.push(p0_u - 1e-6);

    for outcome in sweep(&params, &states, &p0s, 150) {
        assert_eq!(outcome.attractor, Attractor::High, "p0 = {}", outcome.p0);
        let final_pi = outcome.final_inflation.unwrap();
        assert!((final_pi - pi_u).abs() < (final_pi - pi_l).abs());
    }
}

#[test]
fn lambda_strictly_inside_unit_interval() {
    for alpha in [0.01, 0.5, 2.0, 100.0] {
        let params = ModelParams::new(alpha, 0.0, 0.0).unwrap();
        assert!(params.lambda() > 0.0);
        assert!(params.lambda() < 1.0);
    }
}

#[test]
fn higher_deficit_never_raises_both_roots() {
    let (params, _, _, _, _) = default_setup();

    let mut previous = None;
    for g in [0.25, 0.28, 0.31, 0.34, 0.37] {
        let states = bracket_steady_states(&params.with_g(g).unwrap(), 1e-12).unwrap();
        if let Some((low, high)) = previous {
            assert!(!(states.low > low && states.high > high));
            assert!(states.high < high);
        }
        previous = Some((states.low, states.high));
    }
}

#[test]
fn infeasible_deficit_rejected_before_solving() {
    let params = ModelParams::default().with_g(0.3849 + 0.01).unwrap();
    let result = solve_steady_states(&params, 0.6, 3.0, STEADY_STATE_TOLERANCE);

    match result {
        Err(ModelError::InfeasibleDeficit { g, max }) => {
            assert!(g > max);
            assert_abs_diff_eq!(max, (1.0f64 / 3.0).sqrt() * 2.0 / 3.0, epsilon = 1e-12);
        }
        other => panic!("expected InfeasibleDeficit, got {other:?}"),
    }
}
