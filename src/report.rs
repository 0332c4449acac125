//! Full analysis pipeline: steady states -> initial prices -> verification
//! by simulation -> sweep over initial conditions.

use log::{info, warn};
use serde::Serialize;

use crate::error::Result;
use crate::initial_price::initial_price;
use crate::params::ModelParams;
use crate::steady_state::{default_steady_states, SteadyStates};
use crate::sweep::{initial_price_grid, run_single, sweep, Attractor, SweepOutcome};
use crate::trajectory::simulate;

pub const VERIFY_TOLERANCE: f64 = 1e-8;

#[derive(Clone, Debug)]
pub struct AnalysisOptions {
    /// Horizon for the stationarity check at `pi_l`. The low steady state
    /// is repelling, so this stays short.
    pub low_verify_steps: usize,
    pub high_verify_steps: usize,
    pub sweep_steps: usize,
    pub grid_step: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            low_verify_steps: 30,
            high_verify_steps: 150,
            sweep_steps: 150,
            grid_step: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SteadyStateCheck {
    pub label: &'static str,
    pub pi_bar: f64,
    pub p0: f64,
    pub steps: usize,
    pub max_inflation_gap: f64,
    pub max_money_growth_gap: f64,
    pub holds: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub params: ModelParams,
    pub lambda: f64,
    pub max_seigniorage: f64,
    pub revenue_maximizing_rate: f64,
    pub steady_states: SteadyStates,
    pub p0_low: f64,
    pub p0_high: f64,
    pub checks: Vec<SteadyStateCheck>,
    pub sweep: Vec<SweepOutcome>,
}

impl AnalysisReport {
    /// Share of swept initial prices above `p0_l` that reach `pi_u`.
    pub fn interior_high_share(&self) -> f64 {
        let interior: Vec<&SweepOutcome> = self.sweep.iter().filter(|o| o.p0 > self.p0_low).collect();
        if interior.is_empty() {
            return 0.0;
        }
        interior.iter().filter(|o| o.attractor == Attractor::High).count() as f64 / interior.len() as f64
    }

    pub fn print(&self) {
        println!("  alpha:                   {}", self.params.alpha());
        println!("  lambda:                  {:.6}", self.lambda);
        println!("  m0:                      {:.6}", self.params.m0());
        println!("  g:                       {}", self.params.g());
        println!("  Max seigniorage:         {:.6} at pi = {:.6}", self.max_seigniorage, self.revenue_maximizing_rate);
        println!();
        println!("  pi_l:                    {:.10}", self.steady_states.low);
        println!("  pi_u:                    {:.10}", self.steady_states.high);
        println!("  p0_l:                    {:.10}", self.p0_low);
        println!("  p0_u:                    {:.10}", self.p0_high);
        println!();

        for check in &self.checks {
            println!(
                "  {} stationary over {} steps: {} (max |pi - pi_bar| = {:.2e}, max |mu - pi_bar| = {:.2e})",
                check.label, check.steps, check.holds, check.max_inflation_gap, check.max_money_growth_gap
            );
        }
        println!();

        println!("| p0         | ends at    | final pi     |");
        println!("|------------|------------|--------------|");
        for outcome in &self.sweep {
            let final_pi = outcome
                .final_inflation
                .map(|pi| format!("{pi:12.6}"))
                .unwrap_or_else(|| format!("{:>12}", "overflow"));
            println!("| {:10.4} | {:10} | {} |", outcome.p0, outcome.attractor.name(), final_pi);
        }
    }
}

pub fn check_steady_state(
    params: &ModelParams,
    label: &'static str,
    pi_bar: f64,
    p0: f64,
    steps: usize,
) -> Result<SteadyStateCheck> {
    let trajectory = simulate(p0, params, steps)?;
    let max_inflation_gap = trajectory.max_inflation_deviation(pi_bar);
    let max_money_growth_gap = trajectory.max_money_growth_deviation(pi_bar);
    let holds = max_inflation_gap < VERIFY_TOLERANCE && max_money_growth_gap < VERIFY_TOLERANCE;

    if !holds {
        warn!("{label}: path from p0 = {p0} drifts from {pi_bar} (gap {max_inflation_gap:e})");
    }

    Ok(SteadyStateCheck {
        label,
        pi_bar,
        p0,
        steps,
        max_inflation_gap,
        max_money_growth_gap,
        holds,
    })
}

pub fn run_analysis(params: &ModelParams, options: &AnalysisOptions) -> Result<AnalysisReport> {
    let steady_states = default_steady_states(params)?;
    let p0_low = initial_price(params, steady_states.low)?;
    let p0_high = initial_price(params, steady_states.high)?;
    info!("initial prices: p0_l = {p0_low:.10}, p0_u = {p0_high:.10}");

    let checks = vec![
        check_steady_state(params, "pi_l", steady_states.low, p0_low, options.low_verify_steps)?,
        check_steady_state(params, "pi_u", steady_states.high, p0_high, options.high_verify_steps)?,
    ];

    // p0_l itself is only classified over the low check's horizon. Over the
    // sweep horizon rounding error carries it off the repelling steady state.
    let grid = initial_price_grid(p0_low, p0_high, options.grid_step)?;
    let mut outcomes = vec![run_single(p0_low, params, &steady_states, options.low_verify_steps)];
    let interior: Vec<f64> = grid.into_iter().filter(|&p0| p0 > p0_low).collect();
    outcomes.extend(sweep(params, &steady_states, &interior, options.sweep_steps));

    Ok(AnalysisReport {
        params: *params,
        lambda: params.lambda(),
        max_seigniorage: params.max_seigniorage(),
        revenue_maximizing_rate: params.revenue_maximizing_rate(),
        steady_states,
        p0_low,
        p0_high,
        checks,
        sweep: outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_analysis() {
        let report = run_analysis(&ModelParams::default(), &AnalysisOptions::default()).unwrap();

        assert!(report.checks.iter().all(|c| c.holds));
        assert_eq!(report.sweep.len(), 16);
        assert_eq!(report.interior_high_share(), 1.0);
    }

    #[test]
    fn test_checks_use_separate_horizons() {
        let report = run_analysis(&ModelParams::default(), &AnalysisOptions::default()).unwrap();

        assert_eq!(report.checks[0].label, "pi_l");
        assert_eq!(report.checks[0].steps, 30);
        assert!(report.checks[0].holds);
        assert_eq!(report.checks[1].label, "pi_u");
        assert_eq!(report.checks[1].steps, 150);
        assert!(report.checks[1].holds);
    }

    #[test]
    fn test_low_initial_price_row_stays_low() {
        let report = run_analysis(&ModelParams::default(), &AnalysisOptions::default()).unwrap();

        assert_eq!(report.sweep[0].p0, report.p0_low);
        assert_eq!(report.sweep[0].attractor, Attractor::Low);
        assert!(report.sweep[1..].iter().all(|o| o.p0 > report.p0_low));
        assert!(report.sweep[1..].iter().all(|o| o.attractor == Attractor::High));
    }

    #[test]
    fn test_report_serializes() {
        let report = run_analysis(&ModelParams::default(), &AnalysisOptions::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["params"]["g"], 0.35);
        assert!(json["params"].get("lambda").is_none());
        assert_eq!(json["checks"].as_array().unwrap().len(), 2);
        assert_eq!(json["sweep"][1]["attractor"], "High");
    }

    #[test]
    fn test_infeasible_analysis_fails() {
        let params = ModelParams::default().with_g(0.5).unwrap();
        assert!(run_analysis(&params, &AnalysisOptions::default()).is_err());
    }
}
