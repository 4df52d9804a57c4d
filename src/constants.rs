// SI constants (values used by the reference runs)
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_565e-19; // C
pub const ELECTRON_MASS: f64 = 9.109_382_91e-31; // kg
pub const PROTON_MASS: f64 = 1.672_621_898e-27; // kg
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_817_620_4e-12; // F/m
pub const ELECTRON_VOLT: f64 = 1.602_177_33e-19; // J

// Run defaults
pub const DEFAULT_HORIZON: f64 = 8.0; // in characteristic times
pub const DEFAULT_RESOLUTION: f64 = 0.01;
pub const DEFAULT_SEED: u64 = 42;
