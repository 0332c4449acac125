//! Equilibrium Dynamics Binary
//!
//! Verifies that each steady state's initial price keeps inflation constant,
//! then sweeps initial prices between the two and plots the paths.
//!
//! ## Usage
//! ```bash
//! cargo run --bin dynamics --release -- --steps 20
//! ```

use std::path::PathBuf;

use clap::Parser;
use laffer_simulation::config::{write_json, ModelArgs};
use laffer_simulation::plot::render_trajectory_panels;
use laffer_simulation::report::{run_analysis, AnalysisOptions};
use laffer_simulation::sweep::initial_price_grid;
use laffer_simulation::trajectory::{simulate, Trajectory};
use laffer_simulation::Result;

#[derive(Parser, Debug)]
#[command(author, version, about = "Equilibrium paths of the Cagan-Laffer model")]
struct Args {
    #[command(flatten)]
    model: ModelArgs,

    /// Steps shown in the plots
    #[arg(long, default_value_t = 20)]
    steps: usize,

    /// Steps used to classify where each swept path ends up
    #[arg(long, default_value_t = 150)]
    sweep_steps: usize,

    /// Spacing of the initial-price grid
    #[arg(long, default_value_t = 0.1)]
    grid_step: f64,

    /// Write the full report as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let params = args.model.resolve()?;

    let options = AnalysisOptions {
        sweep_steps: args.sweep_steps,
        grid_step: args.grid_step,
        ..AnalysisOptions::default()
    };

    println!("=======================================================");
    println!("  Cagan-Laffer Equilibrium Dynamics");
    println!("=======================================================");
    println!();

    let report = run_analysis(&params, &options)?;
    report.print();
    println!();
    println!(
        "Interior initial prices reaching pi_u: {:.1}%",
        report.interior_high_share() * 100.0
    );
    println!();

    println!("=======================================================");
    println!("  Steady-state paths");
    println!("=======================================================");
    println!();
    let steady_paths = vec![
        simulate(report.p0_low, &params, args.steps)?,
        simulate(report.p0_high, &params, args.steps)?,
    ];
    println!("{}", render_trajectory_panels(&steady_paths, &report.steady_states, 64, 12));

    println!("=======================================================");
    println!("  Paths from p0_l to p0_u");
    println!("=======================================================");
    println!();
    let swept: Vec<Trajectory> = initial_price_grid(report.p0_low, report.p0_high, args.grid_step.max(0.25))?
        .into_iter()
        .map(|p0| simulate(p0, &params, args.steps))
        .collect::<Result<_>>()?;
    println!("{}", render_trajectory_panels(&swept, &report.steady_states, 64, 12));

    if let Some(path) = &args.json {
        write_json(path, &report)?;
    }
    Ok(())
}
