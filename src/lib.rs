//! Cagan-Laffer Inflation Tax Simulation Library
//!
//! Numerical analysis of a government that finances a fixed share `g` of
//! output by printing money, with Cagan-style money demand. The library
//! finds the two stationary inflation rates that raise `g` in seigniorage,
//! backs out the initial price level consistent with each, and simulates
//! the nonlinear money/price recursion from arbitrary initial prices.
//!
//! ## Modules
//!
//! - `params`: model parameters and the stationary Laffer curve
//! - `solver`: scalar root finding (Newton, bisection)
//! - `steady_state`: the two stationary inflation rates
//! - `initial_price`: initial price level for a given steady state
//! - `trajectory`: forward simulation of the recursion
//! - `sweep`: initial-condition grids and randomized perturbation studies
//! - `plot`: text charts of the Laffer curve and time series
//! - `report`: the full analysis pipeline
//! - `config`: command-line and JSON parameter loading
//!
//! ## Usage
//!
//! ```bash
//! # Steady states, initial prices and the Laffer curve
//! cargo run --bin steady_state --release
//!
//! # Equilibrium paths from a sweep of initial prices
//! cargo run --bin dynamics --release
//!
//! # Randomized perturbation study
//! cargo run --bin perturbation --release -- --seed 7
//! ```

pub mod config;
pub mod error;
pub mod initial_price;
pub mod params;
pub mod plot;
pub mod report;
pub mod solver;
pub mod steady_state;
pub mod sweep;
pub mod trajectory;

pub use error::{ModelError, Result};
pub use params::ModelParams;
pub use steady_state::SteadyStates;
pub use trajectory::Trajectory;
