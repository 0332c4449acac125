//! Stationary Inflation Rates Binary
//!
//! Solves for both steady states, their initial price levels, and draws the
//! stationary Laffer curve.
//!
//! ## Usage
//! ```bash
//! cargo run --bin steady_state --release -- --g 0.35
//! ```

use std::path::PathBuf;

use clap::Parser;
use laffer_simulation::config::{write_json, ModelArgs};
use laffer_simulation::initial_price::initial_price;
use laffer_simulation::plot::render_laffer_curve;
use laffer_simulation::steady_state::{
    bracket_steady_states, solve_steady_states, DEFAULT_HIGH_GUESS, DEFAULT_LOW_GUESS,
    STEADY_STATE_TOLERANCE,
};
use laffer_simulation::Result;

#[derive(Parser, Debug)]
#[command(author, version, about = "Steady states of the Cagan-Laffer model")]
struct Args {
    #[command(flatten)]
    model: ModelArgs,

    /// Starting guess for the low-inflation steady state
    #[arg(long, default_value_t = DEFAULT_LOW_GUESS)]
    low_guess: f64,

    /// Starting guess for the high-inflation steady state
    #[arg(long, default_value_t = DEFAULT_HIGH_GUESS)]
    high_guess: f64,

    /// Write the steady states as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let params = args.model.resolve()?;

    println!("=======================================================");
    println!("  Cagan-Laffer Steady States");
    println!("=======================================================");
    println!();
    println!("Parameters:");
    println!("  alpha = {}, lambda = {:.6}, m0 = {:.6}, g = {}", params.alpha(), params.lambda(), params.m0(), params.g());
    println!(
        "  Laffer peak: {:.6} at pi = {:.6}",
        params.max_seigniorage(),
        params.revenue_maximizing_rate()
    );
    println!();

    let states = solve_steady_states(&params, args.low_guess, args.high_guess, STEADY_STATE_TOLERANCE)?;
    let bracketed = bracket_steady_states(&params, STEADY_STATE_TOLERANCE)?;
    let p0_l = initial_price(&params, states.low)?;
    let p0_u = initial_price(&params, states.high)?;

    println!("| Steady state | pi (Newton)    | pi (bisection) | p0             |");
    println!("|--------------|----------------|----------------|----------------|");
    println!("| low          | {:14.10} | {:14.10} | {:14.10} |", states.low, bracketed.low, p0_l);
    println!("| high         | {:14.10} | {:14.10} | {:14.10} |", states.high, bracketed.high, p0_u);
    println!();

    println!("{}", render_laffer_curve(&params, &states, 72, 20));

    if let Some(path) = &args.json {
        write_json(path, &states)?;
    }
    Ok(())
}
