//! Model Parameters
//!
//! The Cagan money-demand model with a deficit financed by printing money:
//!
//! ```text
//! m_{t+1} - p_t       = -alpha * (p_{t+1} - p_t)      (money demand)
//! M_{t+1} - M_t       = g * P_t                      (seigniorage)
//! ```
//!
//! All state variables are natural logs. `lambda = alpha / (1 + alpha)`
//! governs how strongly the price level reacts to the next money stock.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Money stock level the default model starts from (`m0 = ln 100`).
pub const DEFAULT_MONEY0: f64 = 100.0;
pub const DEFAULT_ALPHA: f64 = 0.5;
pub const DEFAULT_G: f64 = 0.35;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParams", into = "RawParams")]
pub struct ModelParams {
    m0: f64,
    alpha: f64,
    lambda: f64,
    g: f64,
}

impl ModelParams {
    /// Builds a parameter set; `lambda` is derived from `alpha`.
    pub fn new(alpha: f64, m0: f64, g: f64) -> Result<Self> {
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(ModelError::InvalidParameter(format!(
                "alpha must be positive and finite, got {alpha}"
            )));
        }
        if !m0.is_finite() {
            return Err(ModelError::InvalidParameter(format!(
                "m0 must be finite, got {m0}"
            )));
        }
        if !g.is_finite() || g < 0.0 {
            return Err(ModelError::InvalidParameter(format!(
                "g must be non-negative and finite, got {g}"
            )));
        }

        Ok(Self {
            m0,
            alpha,
            lambda: alpha / (1.0 + alpha),
            g,
        })
    }

    /// Same as [`ModelParams::new`] but takes the money stock as a level.
    pub fn from_money_level(alpha: f64, money0: f64, g: f64) -> Result<Self> {
        if money0.is_nan() || money0 <= 0.0 {
            return Err(ModelError::InvalidParameter(format!(
                "initial money stock must be positive, got {money0}"
            )));
        }
        Self::new(alpha, money0.ln(), g)
    }

    pub fn m0(&self) -> f64 {
        self.m0
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    /// Copy of these parameters with a different deficit share.
    pub fn with_g(&self, g: f64) -> Result<Self> {
        Self::new(self.alpha, self.m0, g)
    }

    /// Steady-state seigniorage raised at inflation rate `x`:
    /// `exp(-alpha x) - exp(-(1 + alpha) x)`.
    pub fn seigniorage(&self, x: f64) -> f64 {
        (-self.alpha * x).exp() - (-(1.0 + self.alpha) * x).exp()
    }

    /// Inflation rate that maximizes steady-state seigniorage, `-ln(lambda)`.
    pub fn revenue_maximizing_rate(&self) -> f64 {
        -self.lambda.ln()
    }

    /// Peak of the Laffer curve, `lambda^alpha * (1 - lambda)`.
    pub fn max_seigniorage(&self) -> f64 {
        self.lambda.powf(self.alpha) * (1.0 - self.lambda)
    }

    pub fn is_feasible(&self) -> bool {
        self.g <= self.max_seigniorage()
    }

    pub fn check_feasible(&self) -> Result<()> {
        if self.is_feasible() {
            Ok(())
        } else {
            Err(ModelError::InfeasibleDeficit {
                g: self.g,
                max: self.max_seigniorage(),
            })
        }
    }
}

impl Default for ModelParams {
    fn default() -> Self {
        let alpha = DEFAULT_ALPHA;
        Self {
            m0: DEFAULT_MONEY0.ln(),
            alpha,
            lambda: alpha / (1.0 + alpha),
            g: DEFAULT_G,
        }
    }
}

/// On-disk form: `lambda` is never read back, it is always re-derived.
#[derive(Serialize, Deserialize)]
struct RawParams {
    m0: f64,
    alpha: f64,
    g: f64,
}

impl TryFrom<RawParams> for ModelParams {
    type Error = ModelError;

    fn try_from(raw: RawParams) -> Result<Self> {
        ModelParams::new(raw.alpha, raw.m0, raw.g)
    }
}

impl From<ModelParams> for RawParams {
    fn from(params: ModelParams) -> Self {
        Self {
            m0: params.m0,
            alpha: params.alpha,
            g: params.g,
        }
    }
}
