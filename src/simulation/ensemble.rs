//! Ensemble runs and their reduction to a single time series.
//!
//! Particles are integrated independently on the rayon pool. Particle `i`
//! draws from stream `i` of a ChaCha8 generator seeded with the run seed, so
//! the result depends only on the seed and never on scheduling.

use crate::error::{SimError, SimResult};
use crate::physics::collision::CollisionModel;
use crate::simulation::trajectory::{Trajectory, TrajectoryIntegrator};
use glam::DVec3;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Independent random stream for one particle of a seeded run.
pub fn particle_rng(seed: u64, particle: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(particle as u64);
    rng
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnsembleAverager {
    particles: usize,
    seed: u64,
}

impl EnsembleAverager {
    pub fn new(particles: usize, seed: u64) -> SimResult<Self> {
        if particles == 0 {
            return Err(SimError::invalid(
                "particles",
                "an ensemble needs at least one particle",
            ));
        }
        Ok(Self { particles, seed })
    }

    pub fn particles(&self) -> usize {
        self.particles
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Integrates every particle, in particle order.
    pub fn trajectories<M: CollisionModel + ?Sized>(
        &self,
        integrator: &TrajectoryIntegrator<'_, M>,
    ) -> SimResult<Vec<Trajectory>> {
        (0..self.particles)
            .into_par_iter()
            .map(|particle| integrator.integrate(&mut particle_rng(self.seed, particle)))
            .collect()
    }

    /// Norm of the component-wise mean velocity at every grid point.
    pub fn average_speed<M: CollisionModel + ?Sized>(
        &self,
        integrator: &TrajectoryIntegrator<'_, M>,
    ) -> SimResult<Vec<f64>> {
        info!(
            "integrating {} particles x {} samples (seed {})",
            self.particles,
            integrator.samples(),
            self.seed
        );

        let mut sum = IndexSum::default();
        for trajectory in self.trajectories(integrator)? {
            sum.add(trajectory.samples().iter().map(|v| v.0))?;
        }
        let speeds = sum.mean()?.into_iter().map(DVec3::length).collect::<Vec<_>>();

        info!(
            "ensemble done; final mean speed {:.6e}",
            speeds.last().copied().unwrap_or(f64::NAN)
        );
        Ok(speeds)
    }

    /// Runs a scalar model once per particle and averages by index.
    pub fn average_scalar<F>(&self, run: F) -> SimResult<Vec<f64>>
    where
        F: Fn(usize) -> SimResult<Vec<f64>> + Sync + Send,
    {
        let rows = (0..self.particles)
            .into_par_iter()
            .map(run)
            .collect::<SimResult<Vec<_>>>()?;
        mean_by_index(&rows)
    }
}

/// Values that can be averaged across an ensemble.
pub trait Sample: Copy + Send + Sync {
    const ZERO: Self;
    fn accumulate(self, other: Self) -> Self;
    fn scaled(self, factor: f64) -> Self;
}

impl Sample for f64 {
    const ZERO: Self = 0.0;

    fn accumulate(self, other: Self) -> Self {
        self + other
    }

    fn scaled(self, factor: f64) -> Self {
        self * factor
    }
}

impl Sample for DVec3 {
    const ZERO: Self = DVec3::ZERO;

    fn accumulate(self, other: Self) -> Self {
        self + other
    }

    fn scaled(self, factor: f64) -> Self {
        self * factor
    }
}

/// Running sum at each index over equally long rows, added in order.
#[derive(Clone, Debug)]
pub struct IndexSum<T> {
    sums: Vec<T>,
    rows: usize,
}

impl<T> Default for IndexSum<T> {
    fn default() -> Self {
        Self {
            sums: Vec::new(),
            rows: 0,
        }
    }
}

impl<T: Sample> IndexSum<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Adds one row; its length must match the first row added.
    pub fn add<I>(&mut self, row: I) -> SimResult<()>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let row = row.into_iter();
        if self.rows == 0 {
            self.sums = vec![T::ZERO; row.len()];
        } else if row.len() != self.sums.len() {
            return Err(SimError::invalid(
                "trajectories",
                format!("length {} differs from {}", row.len(), self.sums.len()),
            ));
        }
        for (sum, value) in self.sums.iter_mut().zip(row) {
            *sum = sum.accumulate(value);
        }
        self.rows += 1;
        Ok(())
    }

    pub fn mean(self) -> SimResult<Vec<T>> {
        if self.rows == 0 {
            return Err(SimError::invalid("particles", "cannot average an empty ensemble"));
        }
        let inv = 1.0 / self.rows as f64;
        Ok(self.sums.into_iter().map(|sum| sum.scaled(inv)).collect())
    }
}

/// Arithmetic mean at each index across equally long rows.
pub fn mean_by_index<T: Sample>(rows: &[Vec<T>]) -> SimResult<Vec<T>> {
    let mut sum = IndexSum::default();
    for row in rows {
        sum.add(row.iter().copied())?;
    }
    sum.mean()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision::Sherlock;
    use crate::physics::parameters::PlasmaParameters;
    use crate::simulation::grid::TimeGrid;
    use crate::simulation::trajectory::BeamConditions;
    use approx::assert_relative_eq;
    use rand::Rng;

    #[test]
    fn mean_by_index_averages_columns() {
        let rows = vec![vec![1.0, 2.0, 3.0], vec![3.0, 4.0, 5.0]];
        assert_eq!(mean_by_index(&rows).unwrap(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn mean_of_vectors_is_component_wise() {
        let rows = vec![
            vec![DVec3::new(1.0, 0.0, 0.0)],
            vec![DVec3::new(-1.0, 0.0, 2.0)],
        ];
        assert_eq!(mean_by_index(&rows).unwrap(), vec![DVec3::new(0.0, 0.0, 1.0)]);
    }

    #[test]
    fn single_row_is_returned_unchanged() {
        let row = vec![0.1, 0.7, 1e-300];
        assert_eq!(mean_by_index(&[row.clone()]).unwrap(), row);
    }

    #[test]
    fn ragged_or_empty_input_is_rejected() {
        assert!(mean_by_index::<f64>(&[]).is_err());
        assert!(mean_by_index(&[vec![1.0], vec![1.0, 2.0]]).is_err());
    }

    #[test]
    fn zero_particles_are_rejected() {
        assert!(matches!(
            EnsembleAverager::new(0, 1),
            Err(SimError::InvalidArgument { name: "particles", .. })
        ));
    }

    #[test]
    fn particle_streams_differ_but_repeat() {
        let a: f64 = particle_rng(7, 0).gen_range(0.0..1.0);
        let b: f64 = particle_rng(7, 1).gen_range(0.0..1.0);
        let c: f64 = particle_rng(7, 0).gen_range(0.0..1.0);
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn index_sum_counts_rows_and_rejects_ragged_ones() {
        let mut sum = IndexSum::default();
        sum.add([1.0, 2.0]).unwrap();
        sum.add([3.0, 6.0]).unwrap();
        assert!(sum.add([1.0]).is_err());
        assert_eq!(sum.rows(), 2);
        assert_eq!(sum.mean().unwrap(), vec![2.0, 4.0]);
        assert!(IndexSum::<f64>::default().mean().is_err());
    }

    #[test]
    fn average_speed_is_the_norm_of_the_mean_trajectory() {
        let grid = TimeGrid::new(8.0, 0.1).unwrap();
        let integrator = TrajectoryIntegrator::new(
            &Sherlock,
            PlasmaParameters::default().coefficients(),
            BeamConditions::default(),
            &grid,
        )
        .unwrap();
        let averager = EnsembleAverager::new(3, 9).unwrap();

        let mut expected = vec![DVec3::ZERO; integrator.samples()];
        for particle in 0..3 {
            let trajectory = integrator.integrate(&mut particle_rng(9, particle)).unwrap();
            for (sum, v) in expected.iter_mut().zip(trajectory.samples()) {
                *sum += v.0;
            }
        }

        let speeds = averager.average_speed(&integrator).unwrap();
        assert_eq!(speeds.len(), expected.len());
        for (speed, sum) in speeds.iter().zip(&expected) {
            assert_relative_eq!(*speed, (*sum / 3.0).length(), max_relative = 1e-12);
        }
    }

    #[test]
    fn scalar_average_runs_every_particle() {
        let averager = EnsembleAverager::new(4, 0).unwrap();
        let mean = averager
            .average_scalar(|i| Ok(vec![i as f64, 2.0 * i as f64]))
            .unwrap();
        assert_eq!(mean, vec![1.5, 3.0]);
    }
}
