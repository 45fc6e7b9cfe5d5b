//! BDD step definitions for the occupancy board

pub mod log_steps;
pub mod status_steps;
