use crate::constants::{ELEMENTARY_CHARGE, PROTON_MASS};
use serde::Serialize;

/// Ion taking part in the collision models, by charge and mass number.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Species {
    pub charge_number: u8,
    pub mass_number: u16,
}

impl Species {
    pub const fn new(charge_number: u8, mass_number: u16) -> Self {
        Self {
            charge_number,
            mass_number,
        }
    }

    /// Al-27, the test ion of the reference runs.
    pub const fn aluminium() -> Self {
        Self::new(13, 27)
    }

    /// Ion mass in kg, taken as `A * m_p`.
    pub fn mass(&self) -> f64 {
        f64::from(self.mass_number) * PROTON_MASS
    }

    /// Ion charge in C.
    pub fn charge(&self) -> f64 {
        f64::from(self.charge_number) * ELEMENTARY_CHARGE
    }
}
