//! Text Charts
//!
//! Terminal renderings of the stationary Laffer curve and of simulated
//! paths. Each chart is a character grid; reference lines are drawn first
//! so data points stay visible on top of them.

use crate::params::ModelParams;
use crate::steady_state::{laffer_curve, SteadyStates};
use crate::trajectory::Trajectory;

const SERIES_GLYPHS: [char; 8] = ['*', 'o', '+', 'x', '#', '@', '%', '&'];
const LABEL_WIDTH: usize = 10;

pub struct Canvas {
    width: usize,
    height: usize,
    x_range: (f64, f64),
    y_range: (f64, f64),
    cells: Vec<Vec<char>>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        let width = width.max(2);
        let height = height.max(2);
        Self {
            width,
            height,
            x_range: widen(x_range),
            y_range: widen(y_range),
            cells: vec![vec![' '; width]; height],
        }
    }

    fn column(&self, x: f64) -> Option<usize> {
        let (lo, hi) = self.x_range;
        let frac = (x - lo) / (hi - lo);
        if !frac.is_finite() || !(0.0..=1.0).contains(&frac) {
            return None;
        }
        Some((frac * (self.width - 1) as f64).round() as usize)
    }

    fn row(&self, y: f64) -> Option<usize> {
        let (lo, hi) = self.y_range;
        let frac = (y - lo) / (hi - lo);
        if !frac.is_finite() || !(0.0..=1.0).contains(&frac) {
            return None;
        }
        // Row 0 is the top of the chart.
        Some(self.height - 1 - (frac * (self.height - 1) as f64).round() as usize)
    }

    pub fn hline(&mut self, y: f64, glyph: char) {
        if let Some(r) = self.row(y) {
            for cell in self.cells[r].iter_mut() {
                *cell = glyph;
            }
        }
    }

    pub fn vline(&mut self, x: f64, glyph: char) {
        if let Some(c) = self.column(x) {
            for row in self.cells.iter_mut() {
                row[c] = glyph;
            }
        }
    }

    pub fn point(&mut self, x: f64, y: f64, glyph: char) {
        if let (Some(c), Some(r)) = (self.column(x), self.row(y)) {
            self.cells[r][c] = glyph;
        }
    }

    pub fn series(&mut self, points: impl IntoIterator<Item = (f64, f64)>, glyph: char) {
        for (x, y) in points {
            self.point(x, y, glyph);
        }
    }

    pub fn render(&self, title: &str) -> String {
        let mut out = String::new();
        out.push_str(title);
        out.push('\n');

        let (y_lo, y_hi) = self.y_range;
        for (r, row) in self.cells.iter().enumerate() {
            let label = if r == 0 {
                format!("{:>w$.3}", y_hi, w = LABEL_WIDTH)
            } else if r == self.height - 1 {
                format!("{:>w$.3}", y_lo, w = LABEL_WIDTH)
            } else if r == self.height / 2 {
                format!("{:>w$.3}", 0.5 * (y_lo + y_hi), w = LABEL_WIDTH)
            } else {
                " ".repeat(LABEL_WIDTH)
            };
            out.push_str(&label);
            out.push_str(" |");
            out.extend(row.iter());
            out.push('\n');
        }

        let (x_lo, x_hi) = self.x_range;
        out.push_str(&" ".repeat(LABEL_WIDTH));
        out.push_str(" +");
        out.push_str(&"-".repeat(self.width));
        out.push('\n');

        let lo_label = format!("{x_lo:.2}");
        let hi_label = format!("{x_hi:.2}");
        let gap = (self.width + 2).saturating_sub(lo_label.len() + hi_label.len());
        out.push_str(&" ".repeat(LABEL_WIDTH));
        out.push_str(&lo_label);
        out.push_str(&" ".repeat(gap));
        out.push_str(&hi_label);
        out.push('\n');
        out
    }
}

fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if hi - lo > f64::EPSILON * lo.abs().max(hi.abs()).max(1.0) {
        (lo, hi)
    } else {
        let pad = 0.5 * lo.abs().max(1.0);
        (lo - pad, hi + pad)
    }
}

fn bounds(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Stationary Laffer curve with the deficit `g` and both steady states marked.
pub fn render_laffer_curve(params: &ModelParams, states: &SteadyStates, width: usize, height: usize) -> String {
    let upper = (1.5 * states.high).max(2.0 * params.revenue_maximizing_rate());
    let curve = laffer_curve(params, upper, width * 2);
    let top = params.max_seigniorage() * 1.1;

    let mut canvas = Canvas::new(width, height, (0.0, upper), (0.0, top));
    canvas.hline(params.g(), '-');
    canvas.vline(states.low, '|');
    canvas.vline(states.high, '|');
    canvas.series(curve, '*');

    canvas.render(&format!(
        "Steady-state seigniorage vs inflation (g = {:.3}, pi_l = {:.4}, pi_u = {:.4})",
        params.g(),
        states.low,
        states.high
    ))
}

fn render_panel(
    title: &str,
    trajectories: &[Trajectory],
    select: impl Fn(&Trajectory) -> &[f64],
    references: &[f64],
    width: usize,
    height: usize,
) -> String {
    let steps = trajectories.iter().map(|t| t.len()).max().unwrap_or(0);
    let values = trajectories
        .iter()
        .flat_map(|t| select(t).iter().copied())
        .chain(references.iter().copied());
    let y_range = bounds(values);

    let mut canvas = Canvas::new(width, height, (0.0, steps.saturating_sub(1) as f64), y_range);
    for &reference in references {
        canvas.hline(reference, '-');
    }
    for (i, trajectory) in trajectories.iter().enumerate() {
        let glyph = SERIES_GLYPHS[i % SERIES_GLYPHS.len()];
        canvas.series(
            select(trajectory).iter().enumerate().map(|(t, &v)| (t as f64, v)),
            glyph,
        );
    }
    canvas.render(title)
}

/// Four panels (money, price, inflation, money growth) for a set of paths.
pub fn render_trajectory_panels(
    trajectories: &[Trajectory],
    states: &SteadyStates,
    width: usize,
    height: usize,
) -> String {
    let rates = states.rates();
    let mut out = String::new();

    let legend: Vec<String> = trajectories
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{} p0 = {:.4}", SERIES_GLYPHS[i % SERIES_GLYPHS.len()], t.p0))
        .collect();
    out.push_str(&format!("Legend: {}\n\n", legend.join(", ")));

    out.push_str(&render_panel("Money supply (log) m_t", trajectories, |t| t.m.as_slice(), &[], width, height));
    out.push('\n');
    out.push_str(&render_panel("Price level (log) p_t", trajectories, |t| t.p.as_slice(), &[], width, height));
    out.push('\n');
    out.push_str(&render_panel("Inflation pi_t", trajectories, |t| t.pi.as_slice(), &rates, width, height));
    out.push('\n');
    out.push_str(&render_panel("Money growth mu_t", trajectories, |t| t.mu.as_slice(), &rates, width, height));
    out
}
