pub mod ensemble;
pub mod grid;
pub mod stepper;
pub mod temperature;
pub mod timescale;
pub mod trajectory;
