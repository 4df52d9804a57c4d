use crate::error::{SimError, SimResult};
use crate::physics::collision::CollisionModel;
use crate::physics::frame::{FluidVelocity, LabVelocity, RotationBasis};
use crate::physics::parameters::CoefficientSet;
use crate::simulation::grid::TimeGrid;
use crate::simulation::stepper::StochasticStepper;
use crate::simulation::timescale::TimeScales;
use glam::DVec3;
use log::debug;
use rand::Rng;
use serde::Serialize;

/// Initial lab-frame velocities of the background fluid and of the beam.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BeamConditions {
    pub fluid_velocity: DVec3,
    pub particle_velocity: DVec3,
}

impl Default for BeamConditions {
    fn default() -> Self {
        Self {
            fluid_velocity: DVec3::ZERO,
            particle_velocity: 1.0e5 * DVec3::new(1.0, 1.0, 0.5),
        }
    }
}

impl BeamConditions {
    /// Particle velocity relative to the fluid.
    pub fn relative_velocity(&self) -> DVec3 {
        self.particle_velocity - self.fluid_velocity
    }
}

/// Lab-frame velocities of one particle, one per grid point, normalized by
/// the initial lab speed.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    samples: Vec<LabVelocity>,
}

impl Trajectory {
    pub fn samples(&self) -> &[LabVelocity] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn speeds(&self) -> Vec<f64> {
        self.samples.iter().map(LabVelocity::speed).collect()
    }
}

/// Everything needed to integrate any particle of a beam; read-only once
/// built, so one integrator is shared by all workers of an ensemble.
pub struct TrajectoryIntegrator<'a, M: ?Sized> {
    stepper: StochasticStepper<'a, M>,
    rotation: RotationBasis,
    beam: BeamConditions,
    initial_speed: f64,
    lab_speed: f64,
    characteristic_time: f64,
    steps: usize,
}

impl<'a, M: CollisionModel + ?Sized> TrajectoryIntegrator<'a, M> {
    /// Aligns the beam, evaluates `tau_ch` at the initial speed and fixes
    /// `dt = resolution * tau_ch`.
    pub fn new(
        model: &'a M,
        coefficients: CoefficientSet,
        beam: BeamConditions,
        grid: &TimeGrid,
    ) -> SimResult<Self> {
        let lab_speed = beam.particle_velocity.length();
        if !(lab_speed.is_finite() && lab_speed > 0.0) {
            return Err(SimError::degenerate(format!(
                "particle lab speed must be positive to normalize, got {lab_speed}"
            )));
        }

        let (initial_speed, rotation) = RotationBasis::aligning(beam.relative_velocity())?;
        let scales = TimeScales::estimate(model, initial_speed, &coefficients)?;
        let characteristic_time = scales.checked_characteristic()?;
        let dt = grid.resolution() * characteristic_time;

        debug!(
            "beam setup: c0 = {initial_speed:.6e} m/s, x = {:.4}, tau = {scales:?}, tau_ch = {characteristic_time:.6e} s, dt = {dt:.6e} s, steps = {}",
            initial_speed / coefficients.thermal_speed,
            grid.steps()
        );

        Ok(Self {
            stepper: StochasticStepper::new(model, coefficients, dt),
            rotation,
            beam,
            initial_speed,
            lab_speed,
            characteristic_time,
            steps: grid.steps(),
        })
    }

    pub fn dt(&self) -> f64 {
        self.stepper.dt()
    }

    pub fn characteristic_time(&self) -> f64 {
        self.characteristic_time
    }

    pub fn initial_speed(&self) -> f64 {
        self.initial_speed
    }

    pub fn rotation(&self) -> &RotationBasis {
        &self.rotation
    }

    /// Number of samples in every trajectory this integrator produces.
    pub fn samples(&self) -> usize {
        self.steps + 1
    }

    /// Integrates one particle and returns its lab-frame trajectory.
    pub fn integrate<R: Rng + ?Sized>(&self, rng: &mut R) -> SimResult<Trajectory> {
        let mut fluid = Vec::with_capacity(self.samples());
        let mut velocity = FluidVelocity::aligned(self.initial_speed);
        fluid.push(velocity);

        for _ in 0..self.steps {
            velocity = self.stepper.step(velocity, rng)?;
            fluid.push(velocity);
        }

        let samples = fluid
            .into_iter()
            .map(|v| {
                let lab = self.rotation.to_lab(v, self.beam.fluid_velocity);
                LabVelocity(lab.0 / self.lab_speed)
            })
            .collect();

        Ok(Trajectory { samples })
    }
}
