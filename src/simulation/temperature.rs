//! Deterministic ion-electron temperature equilibration.
//!
//! Integrates `dTi/dt = -(2/3) nu_e (Ti - Te)` with forward Euler, where the
//! collision frequency follows the instantaneous thermal speed
//! `vT = sqrt(2 (Ti/mi + Te/me))`. The step is a fixed fraction of the
//! initial relaxation time `1 / nu_e(0)`.

use crate::constants::{ELECTRON_MASS, ELECTRON_VOLT, ELEMENTARY_CHARGE, PROTON_MASS};
use crate::error::{SimError, SimResult, require_positive};
use crate::physics::species::Species;
use crate::simulation::grid::TimeGrid;
use log::debug;
use serde::Serialize;
use std::f64::consts::PI;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemperatureRelaxation {
    /// Ion whose charge and mass enter the collision frequency.
    pub collision_ion: Species,
    /// Mass number of the ion mass in the thermal speed. Kept separate from
    /// `collision_ion` (A = 23 against A = 27 by default).
    pub thermal_ion_mass_number: u16,
    pub density: f64,
    pub coulomb_log: f64,
    pub electron_temperature_ev: f64,
    /// `Ti(0) / Te`.
    pub initial_ratio: f64,
}

impl Default for TemperatureRelaxation {
    fn default() -> Self {
        Self {
            collision_ion: Species::aluminium(),
            thermal_ion_mass_number: 23,
            density: 7.0e23,
            coulomb_log: 17.0,
            electron_temperature_ev: 1.0,
            initial_ratio: 10.0,
        }
    }
}

impl TemperatureRelaxation {
    /// Electron-ion energy exchange frequency at thermal speed `vt`.
    pub fn collision_frequency(&self, vt: f64) -> f64 {
        let z = f64::from(self.collision_ion.charge_number);
        16.0 * PI.sqrt() * z.powi(2) * ELEMENTARY_CHARGE.powi(4) * self.density * self.coulomb_log
            / (ELECTRON_MASS * self.collision_ion.mass() * vt.powi(3))
    }

    /// Combined thermal speed for temperatures given in joules.
    pub fn thermal_speed(&self, ti: f64, te: f64) -> f64 {
        let mi = f64::from(self.thermal_ion_mass_number) * PROTON_MASS;
        (2.0 * (ti / mi + te / ELECTRON_MASS)).sqrt()
    }

    /// `Ti(t) / Ti(0)` at every grid point.
    pub fn relax(&self, grid: &TimeGrid) -> SimResult<Vec<f64>> {
        require_positive("electron_temperature_ev", self.electron_temperature_ev)?;
        require_positive("initial_ratio", self.initial_ratio)?;

        let te = self.electron_temperature_ev * ELECTRON_VOLT;
        let ti0 = self.initial_ratio * te;

        let mut ti = ti0;
        let mut vt = self.thermal_speed(ti, te);
        let nu0 = self.collision_frequency(vt);
        if !(nu0.is_finite() && nu0 > 0.0) {
            return Err(SimError::degenerate(format!(
                "collision frequency {nu0} cannot set a step"
            )));
        }
        let dt = grid.resolution() / nu0;
        debug!("temperature relaxation: tau_e = {:.6e} s, dt = {dt:.6e} s", 1.0 / nu0);

        let mut ratios = Vec::with_capacity(grid.sample_count());
        ratios.push(1.0);
        for _ in 0..grid.steps() {
            let dti = -(2.0 / 3.0) * self.collision_frequency(vt) * (ti - te);
            ti += dt * dti;
            vt = self.thermal_speed(ti, te);
            ratios.push(ti / ti0);
        }

        Ok(ratios)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ratio_decreases_monotonically_toward_electron_temperature() {
        let model = TemperatureRelaxation::default();
        for resolution in [0.1, 0.05, 0.01] {
            let grid = TimeGrid::new(8.0, resolution).unwrap();
            let ratios = model.relax(&grid).unwrap();

            assert_eq!(ratios.len(), grid.sample_count());
            assert_eq!(ratios[0], 1.0);
            for pair in ratios.windows(2) {
                assert!(pair[1] < pair[0], "not decreasing: {pair:?}");
            }
            let floor = 1.0 / model.initial_ratio;
            assert!(ratios.iter().all(|&r| r > floor));
        }
    }

    #[test]
    fn follows_the_exponential_at_fine_resolution() {
        // vT is dominated by the electrons, so nu_e is nearly constant and
        // Ti - Te decays as exp(-2t/3) in units of tau_e.
        let model = TemperatureRelaxation::default();
        let grid = TimeGrid::new(3.0, 0.001).unwrap();
        let ratios = model.relax(&grid).unwrap();
        let floor = 1.0 / model.initial_ratio;
        let expected = floor + (1.0 - floor) * (-2.0_f64).exp();
        assert_relative_eq!(ratios[grid.steps()], expected, max_relative = 1e-2);
    }

    #[test]
    fn equal_temperatures_stay_put() {
        let model = TemperatureRelaxation {
            initial_ratio: 1.0,
            ..Default::default()
        };
        let grid = TimeGrid::new(1.0, 0.1).unwrap();
        assert!(model.relax(&grid).unwrap().iter().all(|&r| r == 1.0));
    }

    #[test]
    fn thermal_speed_uses_its_own_mass_number() {
        let te = ELECTRON_VOLT;
        let ti = 10.0 * te;
        let base = TemperatureRelaxation::default();
        let expected = (2.0 * (ti / (23.0 * PROTON_MASS) + te / ELECTRON_MASS)).sqrt();
        assert_relative_eq!(base.thermal_speed(ti, te), expected, max_relative = 1e-15);

        let heavier = TemperatureRelaxation {
            thermal_ion_mass_number: 27,
            ..base.clone()
        };
        assert!(heavier.thermal_speed(ti, te) < base.thermal_speed(ti, te));
        assert_eq!(heavier.collision_frequency(1.0e6), base.collision_frequency(1.0e6));
    }

    #[test]
    fn rejects_non_positive_temperature() {
        let model = TemperatureRelaxation {
            electron_temperature_ev: 0.0,
            ..Default::default()
        };
        let grid = TimeGrid::new(1.0, 0.1).unwrap();
        assert!(matches!(
            model.relax(&grid),
            Err(SimError::InvalidArgument { .. })
        ));
    }
}
