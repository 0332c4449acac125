//! Parameter configuration shared by the binaries.
//!
//! Parameters come from `ModelParams::default()`, optionally replaced by a
//! JSON file (`{ "m0": .., "alpha": .., "g": .. }`), with individual
//! command-line flags applied last.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use log::info;

use crate::error::{ModelError, Result};
use crate::params::ModelParams;

#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Money demand elasticity (alpha)
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Initial money stock as a level; m0 = ln(money0)
    #[arg(long)]
    pub money0: Option<f64>,

    /// Share of output financed by printing money (g)
    #[arg(long)]
    pub g: Option<f64>,

    /// JSON file with `m0`, `alpha` and `g`
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ModelArgs {
    pub fn resolve(&self) -> Result<ModelParams> {
        let base = match &self.config {
            Some(path) => load_params(path)?,
            None => ModelParams::default(),
        };

        let alpha = self.alpha.unwrap_or(base.alpha());
        let g = self.g.unwrap_or(base.g());
        let params = match self.money0 {
            Some(money0) => ModelParams::from_money_level(alpha, money0, g)?,
            None => ModelParams::new(alpha, base.m0(), g)?,
        };

        info!(
            "model: alpha = {}, lambda = {:.6}, m0 = {:.6}, g = {}",
            params.alpha(),
            params.lambda(),
            params.m0(),
            params.g()
        );
        Ok(params)
    }
}

pub fn load_params(path: &Path) -> Result<ModelParams> {
    let text = fs::read_to_string(path)
        .map_err(|e| ModelError::Config(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| ModelError::Config(format!("invalid parameters in {}: {e}", path.display())))
}

/// Writes any serializable value as pretty JSON.
pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    info!("wrote {}", path.display());
    Ok(())
}
