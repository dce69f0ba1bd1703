//! High-level runtime engine settings
//!
//! Selects the solver used when running a `Scenario`

use crate::configuration::config::SolverConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
    pub solver: SolverConfig, // rk4 or analytical
}
