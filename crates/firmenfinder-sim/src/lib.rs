pub mod generate;
pub mod jitter;
pub mod vocab;

pub use generate::{generate_places, SimError, SimulationParams};
pub use jitter::sample_point;
