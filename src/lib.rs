//! Langevin relaxation of a test ion in an electron background.
//!
//! A beam particle is advanced with a stochastic Euler-Maruyama update built
//! from Sherlock's friction and diffusion coefficients; an ensemble of such
//! particles is averaged into the mean beam speed. A deterministic
//! ion-electron temperature equilibration run shares the same grid and
//! reduction.
//!
//! ```no_run
//! let speed = plasma_langevin::run_speed_ensemble(100, 0.01)?;
//! assert_eq!(speed.time.len(), 801);
//! # Ok::<(), plasma_langevin::SimError>(())
//! ```

pub mod constants;
pub mod error;
pub mod output;
pub mod physics;
pub mod run;
pub mod simulation;

pub use error::{SimError, SimResult};
pub use physics::collision::{CollisionModel, Sherlock};
pub use physics::frame::{FluidVelocity, LabVelocity, RotationBasis};
pub use physics::parameters::{CoefficientSet, PlasmaParameters};
pub use physics::species::Species;
pub use run::{
    EnsembleConfig, Series, run_speed_ensemble, run_temperature_ensemble, speed_ensemble,
    temperature_ensemble,
};
pub use simulation::ensemble::EnsembleAverager;
pub use simulation::grid::TimeGrid;
pub use simulation::stepper::StochasticStepper;
pub use simulation::temperature::TemperatureRelaxation;
pub use simulation::timescale::TimeScales;
pub use simulation::trajectory::{BeamConditions, Trajectory, TrajectoryIntegrator};
