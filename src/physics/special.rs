//! Sherlock's closed-form approximation and the dimensionless Coulomb
//! coefficients built from it.
//!
//! All functions take `x = v / vT`. The diffusion coefficients divide by `x`
//! and are only meaningful for `x > 0`; use
//! [`CollisionModel::coefficients`](crate::physics::collision::CollisionModel::coefficients)
//! for a checked evaluation.

use std::f64::consts::PI;

pub use libm::erf;

/// `G(x) = x / (2x^3 + 3 / (2 sqrt(pi)))`, valid for `x >= 0`.
pub fn sherlock_g(x: f64) -> f64 {
    x / (2.0 * x.powi(3) + 3.0 / (2.0 * PI.sqrt()))
}

/// Friction (drag) coefficient, `-G(x)`.
pub fn friction(x: f64) -> f64 {
    -sherlock_g(x)
}

/// Parallel diffusion coefficient, `G(x) / x`.
pub fn parallel_diffusion(x: f64) -> f64 {
    sherlock_g(x) / x
}

/// Perpendicular diffusion coefficient, `(erf(x) - G(x)) / x`.
///
/// Slightly negative for small `x` because of the approximation; callers
/// take the magnitude.
pub fn perpendicular_diffusion(x: f64) -> f64 {
    (erf(x) - sherlock_g(x)) / x
}
