//! Lorentz force and the acceleration laws built on it
//!
//! Defines the `Acceleration` trait with a relativistic implementation
//! (exact reduction of d(γmv)/dt = F) and a classical one (a = F/m), plus the
//! serializable `Kinematics` selector used by the integrator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{InvalidConfiguration, Result};
use crate::simulation::fields::FieldModel;
use crate::simulation::params::ParticleParameters;
use crate::simulation::states::{NVec3, ParticleState};

/// Speed of light in vacuum (m/s)
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Lorentz factor used in place of an infinite or undefined one
pub const DEFAULT_GAMMA_CEILING: f64 = 1.0e6;

/// Lorentz force F = q (E + v × B), in newtons
pub fn lorentz_force(charge: f64, velocity: &NVec3, e: &NVec3, b: &NVec3) -> NVec3 {
    charge * (e + velocity.cross(b))
}

/// Lorentz factor γ = 1 / sqrt(1 - v²/c²), capped at `ceiling`
///
/// Returns `(gamma, clamped)`. `clamped` is true when |v| >= c or when the
/// true factor exceeds the ceiling. In both cases the returned γ is the
/// ceiling and anything computed from it is non-physical.
pub fn lorentz_factor(velocity: &NVec3, ceiling: f64) -> (f64, bool) {
    let beta2 = velocity.norm_squared() / (SPEED_OF_LIGHT * SPEED_OF_LIGHT);
    if beta2 >= 1.0 {
        return (ceiling, true);
    }
    let gamma = (1.0 - beta2).sqrt().recip();
    if gamma > ceiling {
        (ceiling, true)
    } else {
        (gamma, false)
    }
}

/// Acceleration of `state` at time `t` with the fields sampled at its position
pub fn acceleration<A, F>(
    law: &A,
    particle: &ParticleParameters,
    state: &ParticleState,
    fields: &F,
    t: f64,
) -> AccelEval
where
    A: Acceleration + ?Sized,
    F: FieldModel + ?Sized,
{
    let e = fields.electric(t, &state.position);
    let b = fields.magnetic(t, &state.position);
    law.acceleration(particle, &state.velocity, &e, &b)
}

/// Result of one acceleration evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelEval {
    pub value: NVec3, // m/s²
    pub gamma: f64,
    pub clamped: bool, // γ was replaced by the ceiling
}

/// Trait for acceleration laws driven by the local E and B
pub trait Acceleration {
    fn acceleration(
        &self,
        particle: &ParticleParameters,
        velocity: &NVec3,
        e: &NVec3,
        b: &NVec3,
    ) -> AccelEval;
}

/// Relativistic equation of motion
///
/// Expanding d(γ m v)/dt = F with dγ/dt = γ³ (v·a)/c² and solving for a gives
///
///   a = (F - (v·F) v / c²) / (γ m)
///
/// The term along v is what keeps |v| below c; dropping it gives the
/// classical law scaled by 1/γ, which is wrong for any force with a
/// component along the motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relativistic {
    pub gamma_ceiling: f64,
}

impl Default for Relativistic {
    fn default() -> Self {
        Self {
            gamma_ceiling: DEFAULT_GAMMA_CEILING,
        }
    }
}

impl Acceleration for Relativistic {
    fn acceleration(
        &self,
        particle: &ParticleParameters,
        velocity: &NVec3,
        e: &NVec3,
        b: &NVec3,
    ) -> AccelEval {
        let force = lorentz_force(particle.charge, velocity, e, b);
        let (gamma, clamped) = lorentz_factor(velocity, self.gamma_ceiling);

        let c2 = SPEED_OF_LIGHT * SPEED_OF_LIGHT;
        let along_v = velocity.dot(&force) / c2;
        let value = (force - along_v * velocity) / (gamma * particle.mass);

        AccelEval {
            value,
            gamma,
            clamped,
        }
    }
}

/// Newtonian a = F / m, valid while |v| << c
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Classical;

impl Acceleration for Classical {
    fn acceleration(
        &self,
        particle: &ParticleParameters,
        velocity: &NVec3,
        e: &NVec3,
        b: &NVec3,
    ) -> AccelEval {
        let force = lorentz_force(particle.charge, velocity, e, b);
        AccelEval {
            value: force / particle.mass,
            gamma: 1.0,
            clamped: false,
        }
    }
}

/// Which acceleration law the integrator uses
/// kinematics: `{ mode: relativistic, gamma_ceiling: 1.0e6 }` or `{ mode: classical }`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Kinematics {
    Relativistic {
        #[serde(default = "default_gamma_ceiling")]
        gamma_ceiling: f64,
    },
    Classical,
}

fn default_gamma_ceiling() -> f64 {
    DEFAULT_GAMMA_CEILING
}

impl Default for Kinematics {
    fn default() -> Self {
        Kinematics::Relativistic {
            gamma_ceiling: DEFAULT_GAMMA_CEILING,
        }
    }
}

impl Kinematics {
    pub fn validate(&self) -> Result<()> {
        match *self {
            Kinematics::Relativistic { gamma_ceiling } => {
                if !gamma_ceiling.is_finite() || gamma_ceiling < 1.0 {
                    return Err(InvalidConfiguration::InvalidGammaCeiling(gamma_ceiling));
                }
                Ok(())
            }
            Kinematics::Classical => Ok(()),
        }
    }
}

impl Acceleration for Kinematics {
    fn acceleration(
        &self,
        particle: &ParticleParameters,
        velocity: &NVec3,
        e: &NVec3,
        b: &NVec3,
    ) -> AccelEval {
        match *self {
            Kinematics::Relativistic { gamma_ceiling } => {
                Relativistic { gamma_ceiling }.acceleration(particle, velocity, e, b)
            }
            Kinematics::Classical => Classical.acceleration(particle, velocity, e, b),
        }
    }
}
