use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Deficit share g = {g} exceeds maximum seigniorage {max:.6}; no steady state exists")]
    InfeasibleDeficit { g: f64, max: f64 },

    #[error("Root finder did not converge after {iterations} iterations (last = {last}, residual = {residual:e})")]
    NoConvergence {
        iterations: usize,
        last: f64,
        residual: f64,
    },

    #[error("Both initial guesses converged to the same steady state {root}")]
    DuplicateRoot { root: f64 },

    #[error("Invalid bracket [{lo}, {hi}]: residual does not change sign")]
    InvalidBracket { lo: f64, hi: f64 },

    #[error("No initial price supports steady-state inflation {pi_bar}: exp(-alpha * pi) <= g")]
    NoInitialPrice { pi_bar: f64 },

    #[error("Numerical overflow at step {step}")]
    NumericalOverflow { step: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
