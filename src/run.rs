//! Entry points producing the two observables of a run.

use crate::constants::{DEFAULT_HORIZON, DEFAULT_SEED};
use crate::error::{SimResult, require_positive};
use crate::physics::collision::{CollisionModel, Sherlock};
use crate::physics::parameters::PlasmaParameters;
use crate::simulation::ensemble::EnsembleAverager;
use crate::simulation::grid::TimeGrid;
use crate::simulation::temperature::TemperatureRelaxation;
use crate::simulation::trajectory::{BeamConditions, TrajectoryIntegrator};
use serde::Serialize;

/// A dimensionless observable sampled on the run's time grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub time: Vec<f64>,
    pub values: Vec<f64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.values.iter().copied())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EnsembleConfig {
    pub particles: usize,
    /// Step as a fraction of the characteristic time.
    pub resolution: f64,
    pub horizon: f64,
    pub seed: u64,
}

impl EnsembleConfig {
    pub fn new(particles: usize, resolution: f64) -> Self {
        Self {
            particles,
            resolution,
            horizon: DEFAULT_HORIZON,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_horizon(mut self, horizon: f64) -> Self {
        self.horizon = horizon;
        self
    }

    fn prepare(&self) -> SimResult<(EnsembleAverager, TimeGrid)> {
        let averager = EnsembleAverager::new(self.particles, self.seed)?;
        require_positive("resolution", self.resolution)?;
        let grid = TimeGrid::new(self.horizon, self.resolution)?;
        Ok((averager, grid))
    }
}

/// Mean beam speed `|<v>| / |v(0)|` for the reference plasma and beam.
pub fn run_speed_ensemble(particles: usize, resolution: f64) -> SimResult<Series> {
    speed_ensemble(
        &EnsembleConfig::new(particles, resolution),
        &Sherlock,
        &PlasmaParameters::default(),
        &BeamConditions::default(),
    )
}

/// `Ti(t) / Ti(0)` for the reference temperature-equilibration run.
pub fn run_temperature_ensemble(particles: usize, resolution: f64) -> SimResult<Series> {
    temperature_ensemble(
        &EnsembleConfig::new(particles, resolution),
        &TemperatureRelaxation::default(),
    )
}

pub fn speed_ensemble<M: CollisionModel + ?Sized>(
    config: &EnsembleConfig,
    model: &M,
    plasma: &PlasmaParameters,
    beam: &BeamConditions,
) -> SimResult<Series> {
    let (averager, grid) = config.prepare()?;
    let integrator = TrajectoryIntegrator::new(model, plasma.coefficients(), *beam, &grid)?;
    let values = averager.average_speed(&integrator)?;
    Ok(Series {
        time: grid.points(),
        values,
    })
}

/// Every member of this ensemble is identical; it is averaged anyway so
/// both observables come out of the same reduction.
pub fn temperature_ensemble(
    config: &EnsembleConfig,
    model: &TemperatureRelaxation,
) -> SimResult<Series> {
    let (averager, grid) = config.prepare()?;
    let values = averager.average_scalar(|_| model.relax(&grid))?;
    Ok(Series {
        time: grid.points(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn invalid_arguments_fail_fast() {
        assert!(matches!(
            run_speed_ensemble(0, 0.01),
            Err(SimError::InvalidArgument { name: "particles", .. })
        ));
        assert!(matches!(
            run_speed_ensemble(5, 0.0),
            Err(SimError::InvalidArgument { name: "resolution", .. })
        ));
        assert!(matches!(
            run_temperature_ensemble(5, -0.1),
            Err(SimError::InvalidArgument { name: "resolution", .. })
        ));
    }

    #[test]
    fn temperature_series_shares_the_grid() {
        let series = run_temperature_ensemble(3, 0.1).unwrap();
        assert_eq!(series.len(), 81);
        assert_eq!(series.values.len(), series.time.len());
        assert_eq!(series.values[0], 1.0);
    }
}
