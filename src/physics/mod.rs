pub mod collision;
pub mod frame;
pub mod parameters;
pub mod special;
pub mod species;
