//! Initial-Condition Sweeps
//!
//! The model has a continuum of equilibria indexed by the initial price
//! level. Only `p0_l` and `p0_u` start on a steady state; every `p0` above
//! `p0_l` ends up at the high-inflation steady state `pi_u` ("perverse
//! dynamics": a higher starting price never leads to the low-inflation
//! outcome), and every `p0` below it collapses.
//!
//! Two ways of probing this:
//! - a deterministic grid from `p0_l` towards `p0_u`
//! - a randomized perturbation study (uniform draws between the two
//!   initial prices, or Gaussian noise around `p0_l`)

use log::{debug, info};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal, Uniform};
use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::params::ModelParams;
use crate::steady_state::SteadyStates;
use crate::trajectory::{simulate, Trajectory};

pub const SETTLE_TOLERANCE: f64 = 1e-6;
pub const SETTLE_TAIL: usize = 10;
/// Upper bound on the number of initial prices one grid may hold.
pub const MAX_GRID_POINTS: usize = 100_000;

/// Where a simulated path ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Attractor {
    Low,
    High,
    /// Price level falling without bound (or overflowed on the way down).
    Collapsed,
    Unsettled,
}

impl Attractor {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "pi_l",
            Self::High => "pi_u",
            Self::Collapsed => "collapse",
            Self::Unsettled => "unsettled",
        }
    }
}

pub fn classify(trajectory: &Trajectory, states: &SteadyStates) -> Attractor {
    if trajectory.settled_at(states.high, SETTLE_TOLERANCE, SETTLE_TAIL) {
        Attractor::High
    } else if trajectory.settled_at(states.low, SETTLE_TOLERANCE, SETTLE_TAIL) {
        Attractor::Low
    } else if trajectory.final_inflation().is_some_and(|pi| pi < 0.0) {
        Attractor::Collapsed
    } else {
        Attractor::Unsettled
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct SweepOutcome {
    pub p0: f64,
    pub attractor: Attractor,
    /// `None` when the run overflowed.
    pub final_inflation: Option<f64>,
}

/// `p0_l, p0_l + step, ...` strictly below `p0_u`.
pub fn initial_price_grid(p0_l: f64, p0_u: f64, step: f64) -> Result<Vec<f64>> {
    if step.is_nan() || step <= 0.0 || step.is_infinite() {
        return Err(ModelError::InvalidParameter(format!(
            "grid step must be positive, got {step}"
        )));
    }

    let span = ((p0_u - p0_l) / step).ceil().max(0.0);
    if !span.is_finite() || span > MAX_GRID_POINTS as f64 {
        return Err(ModelError::InvalidParameter(format!(
            "grid step {step} gives more than {MAX_GRID_POINTS} initial prices"
        )));
    }

    let count = span as usize;
    Ok((0..count)
        .map(|i| p0_l + i as f64 * step)
        .filter(|&p0| p0 < p0_u)
        .collect())
}

pub fn run_single(p0: f64, params: &ModelParams, states: &SteadyStates, steps: usize) -> SweepOutcome {
    match simulate(p0, params, steps) {
        Ok(trajectory) => SweepOutcome {
            p0,
            attractor: classify(&trajectory, states),
            final_inflation: trajectory.final_inflation(),
        },
        Err(err) => {
            debug!("p0 = {p0}: {err}");
            SweepOutcome {
                p0,
                attractor: Attractor::Collapsed,
                final_inflation: None,
            }
        }
    }
}

pub fn sweep(params: &ModelParams, states: &SteadyStates, p0s: &[f64], steps: usize) -> Vec<SweepOutcome> {
    p0s.iter()
        .map(|&p0| run_single(p0, params, states, steps))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum PerturbationDesign {
    UniformBetween,   // p0 ~ U(p0_l, p0_u)
    GaussianAroundLow, // p0 = p0_l + N(0, sigma)
}

impl PerturbationDesign {
    pub fn all() -> Vec<Self> {
        vec![Self::UniformBetween, Self::GaussianAroundLow]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::UniformBetween => "Uniform between p0_l and p0_u",
            Self::GaussianAroundLow => "Gaussian noise around p0_l",
        }
    }
}

#[derive(Clone, Debug)]
pub struct PerturbationConfig {
    pub design: PerturbationDesign,
    pub runs: usize,
    pub steps: usize,
    pub sigma: f64,
}

impl Default for PerturbationConfig {
    fn default() -> Self {
        Self {
            design: PerturbationDesign::UniformBetween,
            runs: 1_000,
            steps: 150,
            sigma: 0.05,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PerturbationSummary {
    pub design: PerturbationDesign,
    pub runs: usize,
    pub outcomes: Vec<SweepOutcome>,

    pub high_share: f64,
    pub low_share: f64,
    pub collapsed_share: f64,
    pub unsettled_share: f64,
    pub min_p0: f64,
    pub max_p0: f64,
}

impl PerturbationSummary {
    fn from_outcomes(design: PerturbationDesign, outcomes: Vec<SweepOutcome>) -> Self {
        let runs = outcomes.len();
        let share = |target: Attractor| {
            if runs == 0 {
                0.0
            } else {
                outcomes.iter().filter(|o| o.attractor == target).count() as f64 / runs as f64
            }
        };

        Self {
            design,
            runs,
            high_share: share(Attractor::High),
            low_share: share(Attractor::Low),
            collapsed_share: share(Attractor::Collapsed),
            unsettled_share: share(Attractor::Unsettled),
            min_p0: outcomes.iter().map(|o| o.p0).fold(f64::INFINITY, f64::min),
            max_p0: outcomes.iter().map(|o| o.p0).fold(f64::NEG_INFINITY, f64::max),
            outcomes,
        }
    }

    pub fn print(&self) {
        println!("  Runs:                    {}", self.runs);
        println!("  p0 range:                [{:.4}, {:.4}]", self.min_p0, self.max_p0);
        println!("  Settled at pi_u:         {:.1}%", self.high_share * 100.0);
        println!("  Settled at pi_l:         {:.1}%", self.low_share * 100.0);
        println!("  Collapsed:               {:.1}%", self.collapsed_share * 100.0);
        println!("  Unsettled:               {:.1}%", self.unsettled_share * 100.0);
    }
}

pub fn run_perturbation_study(
    params: &ModelParams,
    states: &SteadyStates,
    p0_bounds: (f64, f64),
    config: &PerturbationConfig,
    rng: &mut impl Rng,
) -> Result<PerturbationSummary> {
    let (p0_l, p0_u) = p0_bounds;
    if p0_l.is_nan() || p0_u.is_nan() || p0_l >= p0_u {
        return Err(ModelError::InvalidParameter(format!(
            "p0_l ({p0_l}) must lie below p0_u ({p0_u})"
        )));
    }

    let draws: Vec<f64> = match config.design {
        PerturbationDesign::UniformBetween => {
            let uniform = Uniform::new(p0_l, p0_u);
            (0..config.runs).map(|_| uniform.sample(rng)).collect()
        }
        PerturbationDesign::GaussianAroundLow => {
            let normal = Normal::new(0.0, config.sigma).map_err(|e| {
                ModelError::InvalidParameter(format!("sigma = {}: {e}", config.sigma))
            })?;
            (0..config.runs).map(|_| p0_l + normal.sample(rng)).collect()
        }
    };

    let outcomes = sweep(params, states, &draws, config.steps);
    let summary = PerturbationSummary::from_outcomes(config.design, outcomes);
    info!(
        "{}: {} runs, {:.1}% settled at pi_u",
        config.design.name(),
        summary.runs,
        summary.high_share * 100.0
    );
    Ok(summary)
}

/// [`run_perturbation_study`] with a reproducible `StdRng`.
pub fn run_seeded_study(
    params: &ModelParams,
    states: &SteadyStates,
    p0_bounds: (f64, f64),
    config: &PerturbationConfig,
    seed: u64,
) -> Result<PerturbationSummary> {
    let mut rng = StdRng::seed_from_u64(seed);
    run_perturbation_study(params, states, p0_bounds, config, &mut rng)
}
