//! Physical and numerical parameters for a run
//!
//! `ParticleParameters` holds the particle itself:
//! - charge in coulombs (signed),
//! - rest mass in kilograms.
//!
//! `IntegrationConfig` holds the numerical settings of the RK4 integrator:
//! - fixed step size and step budget,
//! - optional square boundary on |x| and |y|,
//! - which acceleration law to use.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, InvalidConfiguration, Result};
use crate::simulation::forces::Kinematics;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleParameters {
    pub charge: f64, // C, signed
    pub mass: f64,   // kg, rest mass
}

impl ParticleParameters {
    pub fn new(charge: f64, mass: f64) -> Self {
        Self { charge, mass }
    }

    /// Charge-to-mass ratio q/m (C/kg)
    pub fn specific_charge(&self) -> f64 {
        self.charge / self.mass
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("charge", self.charge)?;
        ensure_finite("mass", self.mass)?;
        if self.mass <= 0.0 {
            return Err(InvalidConfiguration::NonPositiveMass(self.mass));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    pub dt: f64,               // s, fixed step
    pub max_steps: usize,      // step budget, samples <= max_steps + 1
    pub boundary: Option<f64>, // m, None disables the exit check
    #[serde(default)]
    pub kinematics: Kinematics,
}

impl IntegrationConfig {
    /// Relativistic run with no boundary
    pub fn new(dt: f64, max_steps: usize) -> Self {
        Self {
            dt,
            max_steps,
            boundary: None,
            kinematics: Kinematics::default(),
        }
    }

    pub fn with_boundary(mut self, boundary: f64) -> Self {
        self.boundary = Some(boundary);
        self
    }

    pub fn with_kinematics(mut self, kinematics: Kinematics) -> Self {
        self.kinematics = kinematics;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("dt", self.dt)?;
        if self.dt <= 0.0 {
            return Err(InvalidConfiguration::NonPositiveTimeStep(self.dt));
        }
        if self.max_steps == 0 {
            return Err(InvalidConfiguration::ZeroStepBudget);
        }
        if let Some(boundary) = self.boundary {
            ensure_finite("boundary", boundary)?;
            if boundary <= 0.0 {
                return Err(InvalidConfiguration::NonPositiveBoundary(boundary));
            }
        }
        self.kinematics.validate()
    }
}
