use crate::error::{SimError, SimResult};
use crate::physics::special;

/// Dimensionless friction and diffusion coefficients at one speed ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coefficients {
    pub friction: f64,
    pub parallel_diffusion: f64,
    pub perpendicular_diffusion: f64,
}

/// Velocity-space collision operator expressed through `x = v / vT`.
pub trait CollisionModel: Send + Sync {
    fn friction(&self, x: f64) -> f64;
    fn parallel_diffusion(&self, x: f64) -> f64;
    fn perpendicular_diffusion(&self, x: f64) -> f64;

    /// Evaluates all three coefficients, refusing `x <= 0` and NaN results.
    fn coefficients(&self, x: f64) -> SimResult<Coefficients> {
        if !(x.is_finite() && x > 0.0) {
            return Err(SimError::degenerate(format!(
                "collision coefficients need a positive speed ratio, got x = {x}"
            )));
        }

        let coefficients = Coefficients {
            friction: self.friction(x),
            parallel_diffusion: self.parallel_diffusion(x),
            perpendicular_diffusion: self.perpendicular_diffusion(x),
        };

        if coefficients.friction.is_nan()
            || coefficients.parallel_diffusion.is_nan()
            || coefficients.perpendicular_diffusion.is_nan()
        {
            return Err(SimError::degenerate(format!(
                "collision coefficients undefined at x = {x}"
            )));
        }

        Ok(coefficients)
    }
}

/// Coefficients from Sherlock's approximation of the Chandrasekhar function.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sherlock;

impl CollisionModel for Sherlock {
    fn friction(&self, x: f64) -> f64 {
        special::friction(x)
    }

    fn parallel_diffusion(&self, x: f64) -> f64 {
        special::parallel_diffusion(x)
    }

    fn perpendicular_diffusion(&self, x: f64) -> f64 {
        special::perpendicular_diffusion(x)
    }
}
