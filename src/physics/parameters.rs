//! Plasma constants and the dimensional scale factors derived from them.

use crate::constants::{ELECTRON_MASS, ELECTRON_VOLT, VACUUM_PERMITTIVITY};
use crate::physics::species::Species;
use serde::Serialize;
use std::f64::consts::PI;

/// Fixed constants describing the test ion and the electron background.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlasmaParameters {
    pub test_ion: Species,
    /// Zb; the background charge is `-Zb * q_t`.
    pub background_charge_number: f64,
    /// Background number density (m^-3).
    pub density: f64,
    pub coulomb_log: f64,
    /// Background temperature `kT` in eV.
    pub temperature_ev: f64,
    /// Multiplies the drag scale as `1 + mu`.
    pub mass_enhancement: f64,
}

impl Default for PlasmaParameters {
    fn default() -> Self {
        Self {
            test_ion: Species::aluminium(),
            background_charge_number: 1.0,
            density: 7.0e23,
            coulomb_log: 17.0,
            temperature_ev: 1.0,
            mass_enhancement: 8.0e7,
        }
    }
}

/// Scale factors shared by every particle of a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CoefficientSet {
    /// Background thermal speed `vT` (m/s).
    pub thermal_speed: f64,
    /// Collision-rate factor `Gamma_tb`.
    pub collision_rate: f64,
    /// `Ac`, acceleration-like drag scale.
    pub drag_scale: f64,
    /// `Bc`, velocity^2 / time diffusion scale.
    pub diffusion_scale: f64,
}

impl PlasmaParameters {
    pub fn coefficients(&self) -> CoefficientSet {
        let q_test = self.test_ion.charge();
        let q_background = -self.background_charge_number * q_test;
        let m_test = self.test_ion.mass();

        let collision_rate = (q_test.powi(2) * q_background.powi(2) * self.density * self.coulomb_log)
            / (2.0 * PI * VACUUM_PERMITTIVITY.powi(2) * m_test.powi(2));
        let thermal_speed = (2.0 * self.temperature_ev * ELECTRON_VOLT / ELECTRON_MASS).sqrt();

        CoefficientSet {
            thermal_speed,
            collision_rate,
            drag_scale: collision_rate / thermal_speed.powi(2) * (1.0 + self.mass_enhancement),
            diffusion_scale: collision_rate / thermal_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn thermal_speed_of_one_ev_electrons() {
        let coefficients = PlasmaParameters::default().coefficients();
        // sqrt(2 eV / m_e)
        assert_relative_eq!(coefficients.thermal_speed, 5.930_971_130_667_6e5, max_relative = 1e-9);
    }

    #[test]
    fn scale_factors_are_consistent() {
        let params = PlasmaParameters::default();
        let c = params.coefficients();
        assert_relative_eq!(
            c.drag_scale * c.thermal_speed / (1.0 + params.mass_enhancement),
            c.diffusion_scale,
            max_relative = 1e-12
        );
        assert!(c.collision_rate > 0.0);
    }

    #[test]
    fn recomputation_is_identical() {
        let params = PlasmaParameters::default();
        assert_eq!(params.coefficients(), params.coefficients());
    }
}
