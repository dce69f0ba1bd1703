pub mod states;
pub mod params;
pub mod engine;
pub mod fields;
pub mod forces;
pub mod integrator;
pub mod analytical;
pub mod trajectory;
pub mod scenario;
