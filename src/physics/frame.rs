//! Frame bookkeeping for a single particle.
//!
//! The update rule is evaluated in a *fluid frame* rotated so that the
//! particle's initial relative velocity lies on `+z`. Velocities carry their
//! frame in the type: [`FluidVelocity`] only ever comes out of the stepper,
//! [`LabVelocity`] only out of [`RotationBasis::to_lab`].

use crate::error::{SimError, SimResult};
use glam::{DMat3, DVec3};
use log::warn;

/// Velocity in the rotated frame comoving with the background fluid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FluidVelocity(pub DVec3);

/// Velocity in the laboratory frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabVelocity(pub DVec3);

impl FluidVelocity {
    /// Velocity of magnitude `speed` along the alignment axis.
    pub fn aligned(speed: f64) -> Self {
        Self(DVec3::new(0.0, 0.0, speed))
    }

    pub fn speed(&self) -> f64 {
        self.0.length()
    }
}

impl LabVelocity {
    pub fn speed(&self) -> f64 {
        self.0.length()
    }
}

/// Forward and inverse rotations for one particle's initial direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationBasis {
    forward: DMat3,
    inverse: DMat3,
    theta: f64,
    phi: f64,
}

impl RotationBasis {
    /// Rotation for polar angle `theta` and azimuth `phi`.
    pub fn from_angles(theta: f64, phi: f64) -> Self {
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_p, cos_p) = phi.sin_cos();

        // Rows of the forward matrix; the third row is the unit direction.
        let e1 = DVec3::new(cos_t * cos_p, cos_t * sin_p, -sin_t);
        let e2 = DVec3::new(-sin_p, cos_p, 0.0);
        let e3 = DVec3::new(sin_t * cos_p, sin_t * sin_p, cos_t);

        let inverse = DMat3::from_cols(e1, e2, e3);
        Self {
            forward: inverse.transpose(),
            inverse,
            theta,
            phi,
        }
    }

    /// Aligns `relative` (lab velocity minus fluid velocity) with `+z`.
    ///
    /// Returns the speed `|relative|` together with the basis. A direction
    /// along the `z` axis leaves the azimuth undefined; `phi = 0` is used
    /// there, which is exact because any azimuth maps `+-z` onto itself.
    pub fn aligning(relative: DVec3) -> SimResult<(f64, Self)> {
        let speed = relative.length();
        if !(speed.is_finite() && speed > 0.0) {
            return Err(SimError::degenerate(format!(
                "cannot align a relative velocity of magnitude {speed}"
            )));
        }

        let theta = (relative.z / speed).clamp(-1.0, 1.0).acos();
        let perp = relative.x.hypot(relative.y);
        let phi = if perp > 0.0 {
            relative.y.atan2(relative.x)
        } else {
            warn!("relative velocity lies on the z axis; using azimuth 0");
            0.0
        };

        Ok((speed, Self::from_angles(theta, phi)))
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn forward(&self) -> DMat3 {
        self.forward
    }

    pub fn inverse(&self) -> DMat3 {
        self.inverse
    }

    /// Lab-oriented relative velocity into the fluid frame.
    pub fn to_fluid(&self, relative: DVec3) -> FluidVelocity {
        FluidVelocity(self.forward * relative)
    }

    /// Rotates back to lab orientation and adds the fluid velocity.
    pub fn to_lab(&self, velocity: FluidVelocity, fluid_velocity: DVec3) -> LabVelocity {
        LabVelocity(self.inverse * velocity.0 + fluid_velocity)
    }
}
