//! Equilibrium Dynamics
//!
//! Forward simulation of the money/price recursion from an initial price
//! level `p0`:
//!
//! ```text
//! m_{t+1} = log(exp(m_t) + g exp(p_t))
//! p_{t+1} = (1 / lambda) p_t + (1 - 1 / lambda) m_{t+1}
//! ```
//!
//! Since `1 / lambda > 1` the price recursion is explosive in `p`: only the
//! `p0` solved for a steady state stays on it, and the low steady state is
//! repelling: a path started exactly at `p0_l` holds for a few dozen steps,
//! after which rounding error has been amplified enough to push it away.

use log::warn;
use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::params::ModelParams;

/// Sequences produced by one simulation run.
///
/// `m[t]` and `p[t]` are the state entering step `t`; `pi[t]` and `mu[t]`
/// are the inflation and money growth realized over that step.
#[derive(Debug, Clone, Serialize)]
pub struct Trajectory {
    pub p0: f64,
    pub m: Vec<f64>,
    pub p: Vec<f64>,
    pub pi: Vec<f64>,
    pub mu: Vec<f64>,
    /// State after the last step.
    pub terminal: (f64, f64),
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.pi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pi.is_empty()
    }

    pub fn final_inflation(&self) -> Option<f64> {
        self.pi.last().copied()
    }

    pub fn max_inflation_deviation(&self, rate: f64) -> f64 {
        max_deviation(&self.pi, rate)
    }

    pub fn max_money_growth_deviation(&self, rate: f64) -> f64 {
        max_deviation(&self.mu, rate)
    }

    /// Whether the last `tail` inflation rates are all within `tolerance` of `rate`.
    pub fn settled_at(&self, rate: f64, tolerance: f64, tail: usize) -> bool {
        if self.pi.len() < tail || tail == 0 {
            return false;
        }
        self.pi[self.pi.len() - tail..]
            .iter()
            .all(|pi| (pi - rate).abs() <= tolerance)
    }
}

fn max_deviation(series: &[f64], rate: f64) -> f64 {
    series.iter().map(|x| (x - rate).abs()).fold(0.0, f64::max)
}

/// One step of the recursion.
pub fn step(params: &ModelParams, m: f64, p: f64) -> (f64, f64) {
    let inv_lambda = 1.0 / params.lambda();
    let m_next = m + (params.g() * (p - m).exp()).ln_1p();
    let p_next = inv_lambda * p + (1.0 - inv_lambda) * m_next;
    (m_next, p_next)
}

/// Simulates `steps` periods starting from `(m0, p0)`.
pub fn simulate(p0: f64, params: &ModelParams, steps: usize) -> Result<Trajectory> {
    let mut trajectory = Trajectory {
        p0,
        m: Vec::with_capacity(steps),
        p: Vec::with_capacity(steps),
        pi: Vec::with_capacity(steps),
        mu: Vec::with_capacity(steps),
        terminal: (params.m0(), p0),
    };

    let (mut m, mut p) = (params.m0(), p0);
    for t in 0..steps {
        let (m_next, p_next) = step(params, m, p);
        if !m_next.is_finite() || !p_next.is_finite() {
            warn!("simulation from p0 = {p0} left the representable range at step {t}");
            return Err(ModelError::NumericalOverflow { step: t });
        }

        trajectory.m.push(m);
        trajectory.p.push(p);
        trajectory.pi.push(p_next - p);
        trajectory.mu.push(m_next - m);

        m = m_next;
        p = p_next;
    }

    trajectory.terminal = (m, p);
    Ok(trajectory)
}
