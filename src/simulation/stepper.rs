//! Euler-Maruyama update for one particle in the fluid frame.
//!
//! Per step, with `x = |v| / vT` evaluated at the start of the step:
//!
//! ```text
//! dv_z = flim * dt * Ac * nu(x) + N(0, sqrt(dt * Bc * |nu_par(x)|))
//! r    = N(0, sqrt(dt * Bc * |nu_perp(x)|)),  angle ~ U[0, 2pi)
//! dv_x = r cos(angle),  dv_y = r sin(angle)
//! ```
//!
//! Only the drag is scaled by the limiter `flim`; the diffusive kicks are
//! always applied in full.

use crate::error::{SimError, SimResult};
use crate::physics::collision::CollisionModel;
use crate::physics::frame::FluidVelocity;
use crate::physics::parameters::CoefficientSet;
use crate::simulation::timescale::TimeScales;
use glam::{DVec2, DVec3};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::TAU;

/// Velocity change produced by one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepIncrement {
    /// Drag limiter applied to `drag`.
    pub limiter: f64,
    /// Unlimited deterministic axial change, `dt * Ac * nu(x)`.
    pub drag: f64,
    pub axial_noise: f64,
    pub transverse_noise: DVec2,
}

impl StepIncrement {
    pub fn total(&self) -> DVec3 {
        DVec3::new(
            self.transverse_noise.x,
            self.transverse_noise.y,
            self.limiter * self.drag + self.axial_noise,
        )
    }
}

pub struct StochasticStepper<'a, M: ?Sized> {
    model: &'a M,
    coefficients: CoefficientSet,
    dt: f64,
}

impl<'a, M: CollisionModel + ?Sized> StochasticStepper<'a, M> {
    pub fn new(model: &'a M, coefficients: CoefficientSet, dt: f64) -> Self {
        Self {
            model,
            coefficients,
            dt,
        }
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn coefficients(&self) -> &CoefficientSet {
        &self.coefficients
    }

    /// Draws the velocity change for a particle currently at `velocity`.
    pub fn increment<R: Rng + ?Sized>(
        &self,
        velocity: FluidVelocity,
        rng: &mut R,
    ) -> SimResult<StepIncrement> {
        let speed = velocity.speed();
        let x = speed / self.coefficients.thermal_speed;
        let c = self.model.coefficients(x)?;
        let limiter =
            TimeScales::from_coefficients(speed, &c, &self.coefficients).step_limiter(self.dt);

        let drag = self.dt * self.coefficients.drag_scale * c.friction;
        let sigma_parallel =
            (self.dt * self.coefficients.diffusion_scale * c.parallel_diffusion.abs()).sqrt();
        let sigma_perp =
            (self.dt * self.coefficients.diffusion_scale * c.perpendicular_diffusion.abs()).sqrt();

        let axial_noise = normal(sigma_parallel)?.sample(rng);
        let radius = normal(sigma_perp)?.sample(rng);
        let angle = rng.gen_range(0.0..TAU);

        Ok(StepIncrement {
            limiter,
            drag,
            axial_noise,
            transverse_noise: DVec2::new(radius * angle.cos(), radius * angle.sin()),
        })
    }

    /// Advances `velocity` by one step.
    pub fn step<R: Rng + ?Sized>(
        &self,
        velocity: FluidVelocity,
        rng: &mut R,
    ) -> SimResult<FluidVelocity> {
        let next = velocity.0 + self.increment(velocity, rng)?.total();
        if !next.is_finite() {
            return Err(SimError::degenerate(format!(
                "velocity became non-finite after a step from {:?}",
                velocity.0
            )));
        }
        Ok(FluidVelocity(next))
    }
}

fn normal(sigma: f64) -> SimResult<Normal<f64>> {
    Normal::new(0.0, sigma)
        .map_err(|err| SimError::degenerate(format!("standard deviation {sigma}: {err}")))
}
