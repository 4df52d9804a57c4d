use crate::error::{SimResult, require_positive};

/// Fixed time grid `0, d, 2d, ..., N d` shared by every particle of a run.
///
/// Times are in units of the run's characteristic time, so `resolution` is
/// the step as a fraction of that time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeGrid {
    horizon: f64,
    resolution: f64,
    steps: usize,
}

impl TimeGrid {
    pub fn new(horizon: f64, resolution: f64) -> SimResult<Self> {
        let horizon = require_positive("horizon", horizon)?;
        let resolution = require_positive("resolution", resolution)?;
        Ok(Self {
            horizon,
            resolution,
            steps: step_count(horizon / resolution),
        })
    }

    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Number of integration steps, `floor(horizon / resolution)`.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of grid points including `t = 0`.
    pub fn sample_count(&self) -> usize {
        self.steps + 1
    }

    pub fn points(&self) -> Vec<f64> {
        (0..=self.steps)
            .map(|i| i as f64 * self.resolution)
            .collect()
    }
}

// Ratios like 8 / 0.01 land a few ulps away from the integer.
fn step_count(ratio: f64) -> usize {
    let nearest = ratio.round();
    if (ratio - nearest).abs() <= 1e-9 * nearest.max(1.0) {
        nearest as usize
    } else {
        ratio.floor() as usize
    }
}
