//! Configuration types for loading particle scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]      – which solver runs the scenario (RK4 or closed form)
//! - [`ParticleConfig`]    – charge and rest mass
//! - [`LaunchConfig`]      – initial speed, in-plane angle and position
//! - [`FieldsConfig`]      – uniform E and B vectors
//! - [`IntegrationSettings`] – step size, budget, boundary, kinematics (RK4)
//! - [`AnalyticalSettings`]  – time axis for the closed-form solver
//! - [`ScenarioConfig`]    – top-level wrapper used to load a scenario from YAML
//!
//! All quantities are SI: C, kg, m/s, V/m, T, s, m. The launch angle is the
//! only exception and is given in degrees.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   solver: "rk4"            # or "analytical"
//!
//! particle:
//!   charge: 1.602e-19        # C, signed
//!   mass: 1.67e-27           # kg
//!
//! launch:
//!   speed: 1.0e6             # m/s
//!   angle_deg: 45.0          # from +x in the x-y plane
//!   position: [0.0, 0.0, 0.0]
//!
//! fields:
//!   e: [0.0, 0.0, 0.0]       # V/m
//!   b: [0.0, 0.0, 1.0]       # T
//!
//! integration:
//!   dt: 1.0e-9
//!   max_steps: 2000
//!   boundary: 0.05           # optional, m
//!   kinematics:
//!     mode: relativistic     # or classical
//!     gamma_ceiling: 1.0e6
//!
//! analytical:                # only read when solver is "analytical"
//!   t_end: 1.0e-7
//!   samples: 1000
//! ```
//!
//! [`crate::Scenario::build_scenario`] maps this onto the runtime types and
//! validates it.

use serde::Deserialize;

use crate::simulation::forces::Kinematics;

/// Which solver the engine runs
/// solver: "rk4"` or `solver: "analytical"
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverConfig {
    #[serde(rename = "rk4")] // Fixed-step RK4 on the (optionally relativistic) Lorentz equation
    Rk4,

    #[serde(rename = "analytical")] // Closed-form non-relativistic solution, E along x and B along z
    Analytical,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub solver: SolverConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ParticleConfig {
    pub charge: f64, // C, signed
    pub mass: f64,   // kg
}

#[derive(Deserialize, Debug, Clone)]
pub struct LaunchConfig {
    pub speed: f64, // m/s
    #[serde(default)]
    pub angle_deg: f64, // degrees from +x, in the x-y plane
    #[serde(default)]
    pub position: [f64; 3], // m, defaults to the origin
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct FieldsConfig {
    #[serde(default)]
    pub e: [f64; 3], // V/m
    #[serde(default)]
    pub b: [f64; 3], // T
}

#[derive(Deserialize, Debug, Clone)]
pub struct IntegrationSettings {
    pub dt: f64,               // s
    pub max_steps: usize,      // step budget
    pub boundary: Option<f64>, // m, absent disables the exit check
    #[serde(default)]
    pub kinematics: Kinematics,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AnalyticalSettings {
    pub t_end: f64,     // s
    pub samples: usize, // evenly spaced over [0, t_end]
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub particle: ParticleConfig,
    pub launch: LaunchConfig,
    #[serde(default)]
    pub fields: FieldsConfig,
    pub integration: Option<IntegrationSettings>, // required by the rk4 solver
    pub analytical: Option<AnalyticalSettings>,   // required by the analytical solver
}
