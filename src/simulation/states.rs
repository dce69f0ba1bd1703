//! Core state types for a single-particle run.
//!
//! - `NVec3` nalgebra vector used for position, velocity, acceleration and fields
//! - `ParticleState` the live (position, velocity) pair advanced by the integrator
//! - `Sample` one time-stamped kinematic record written to a trajectory
//!
//! Everything is in SI units: metres, seconds, metres per second.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{InvalidConfiguration, Result};

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleState {
    pub position: NVec3, // m
    pub velocity: NVec3, // m/s
}

impl ParticleState {
    pub fn new(position: NVec3, velocity: NVec3) -> Self {
        Self { position, velocity }
    }

    /// State at the origin with the given launch velocity
    pub fn at_origin(velocity: NVec3) -> Self {
        Self {
            position: NVec3::zeros(),
            velocity,
        }
    }

    /// In-plane launch: speed `v0` at angle `theta` (radians) from +x, at the origin
    pub fn launch(v0: f64, theta: f64) -> Self {
        Self::at_origin(NVec3::new(v0 * theta.cos(), v0 * theta.sin(), 0.0))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.position.iter().all(|c| c.is_finite()) {
            return Err(InvalidConfiguration::NonFinite { name: "initial position" });
        }
        if !self.velocity.iter().all(|c| c.is_finite()) {
            return Err(InvalidConfiguration::NonFinite { name: "initial velocity" });
        }
        Ok(())
    }
}

/// One kinematic record
/// `acceleration` is a diagnostic, it is not part of the integrated state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub t: f64, // s
    pub position: NVec3,
    pub velocity: NVec3,
    pub acceleration: NVec3,
}

impl Sample {
    /// Drop the diagnostic acceleration and return the state this sample describes.
    /// Feeding it back as an initial state resumes a run.
    pub fn state(&self) -> ParticleState {
        ParticleState::new(self.position, self.velocity)
    }
}
