use crate::error::{SimError, SimResult};
use crate::physics::collision::{CollisionModel, Coefficients};
use crate::physics::parameters::CoefficientSet;

/// Slowing-down and diffusion times at one speed.
///
/// The approximated coefficients can turn slightly negative away from their
/// asymptotic range, so magnitudes are taken before dividing. A vanishing
/// coefficient gives an infinite time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScales {
    pub slowing: f64,
    pub parallel: f64,
    pub perpendicular: f64,
}

impl TimeScales {
    pub fn estimate<M: CollisionModel + ?Sized>(
        model: &M,
        speed: f64,
        coefficients: &CoefficientSet,
    ) -> SimResult<Self> {
        let c = model.coefficients(speed / coefficients.thermal_speed)?;
        Ok(Self::from_coefficients(speed, &c, coefficients))
    }

    /// Times at `speed` from coefficients already evaluated at `speed / vT`.
    pub fn from_coefficients(speed: f64, c: &Coefficients, scales: &CoefficientSet) -> Self {
        Self {
            slowing: speed / (scales.drag_scale * c.friction.abs()),
            parallel: speed.powi(2) / (scales.diffusion_scale * c.parallel_diffusion.abs()),
            perpendicular: speed.powi(2)
                / (scales.diffusion_scale * c.perpendicular_diffusion.abs()),
        }
    }

    /// Shortest of the three times.
    pub fn characteristic(&self) -> f64 {
        self.slowing.min(self.parallel).min(self.perpendicular)
    }

    /// Characteristic time, rejected if it cannot set a step size.
    pub fn checked_characteristic(&self) -> SimResult<f64> {
        let tau = self.characteristic();
        if tau.is_finite() && tau > 0.0 {
            Ok(tau)
        } else {
            Err(SimError::degenerate(format!(
                "characteristic time is {tau} ({self:?})"
            )))
        }
    }

    /// `min(1, tau_i / 2dt)`; scales the drag so it cannot overshoot within
    /// one step. `dt` itself is never changed.
    pub fn step_limiter(&self, dt: f64) -> f64 {
        let two_dt = 2.0 * dt;
        1.0_f64
            .min(self.slowing / two_dt)
            .min(self.parallel / two_dt)
            .min(self.perpendicular / two_dt)
    }
}
