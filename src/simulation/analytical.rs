//! Closed-form, non-relativistic motion in uniform crossed fields
//!
//! Layout: E along +x, B along +z, launch in the x-y plane at the origin with
//! speed `v0` and angle `theta` from +x. With a = qE/m and ω = qB/m (signed
//! by the charge) the equations of motion are
//!
//!   dvx/dt = a + ω vy
//!   dvy/dt =   - ω vx
//!
//! Their solution is a circle of angular frequency ω whose centre drifts at
//! E/B along -y (the E×B direction). Every sample is computed directly from
//! its own `t`; nothing carries over between samples.
//!
//! The B ≠ 0 solution is written in terms of θ = ωt using sin θ / ω,
//! (1 - cos θ) / ω² and (θ - sin θ) / ω², each expressed as a power of t
//! times a bounded function of θ. Nothing divides by ω, so the branch
//! converges to the B = 0 one instead of cancelling E/B against itself.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, InvalidConfiguration, Result};
use crate::simulation::params::ParticleParameters;
use crate::simulation::states::{NVec3, Sample};
use crate::simulation::trajectory::{TerminationReason, Trajectory};

/// Scalar field strengths: E along +x (V/m), B along +z (T)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldScalars {
    pub e: f64,
    pub b: f64,
}

impl FieldScalars {
    pub fn new(e: f64, b: f64) -> Self {
        Self { e, b }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// B = 0: uniform acceleration along E
    UniformElectric,
    /// B ≠ 0, E = 0: pure cyclotron circle
    Cyclotron,
    /// B ≠ 0, E ≠ 0: cyclotron motion with E×B drift
    CrossedDrift,
}

/// Signed cyclotron angular frequency ω = qB/m (rad/s)
pub fn cyclotron_frequency(particle: &ParticleParameters, b: f64) -> f64 {
    particle.charge * b / particle.mass
}

/// Gyro-radius |v_perp / ω| (m). Infinite when ω is zero.
pub fn gyro_radius(particle: &ParticleParameters, v_perp: f64, b: f64) -> f64 {
    (v_perp / cyclotron_frequency(particle, b)).abs()
}

/// `samples` evenly spaced times from 0 to `t_end` inclusive
pub fn time_grid(t_end: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let step = t_end / (n - 1) as f64;
            (0..n).map(|i| i as f64 * step).collect()
        }
    }
}

// Below this |θ| the series for θ - sin θ is used instead of the difference
const SERIES_THRESHOLD: f64 = 0.1;

/// sin θ / θ, equal to 1 at θ = 0
fn sinc(theta: f64) -> f64 {
    if theta == 0.0 {
        1.0
    } else {
        theta.sin() / theta
    }
}

/// (θ - sin θ) / θ² without cancellation for small θ
fn theta_minus_sin_scaled(theta: f64) -> f64 {
    if theta.abs() < SERIES_THRESHOLD {
        let t2 = theta * theta;
        // θ/3! - θ³/5! + θ⁵/7! - θ⁷/9!
        theta / 6.0 * (1.0 - t2 / 20.0 * (1.0 - t2 / 42.0 * (1.0 - t2 / 72.0)))
    } else {
        (theta - theta.sin()) / (theta * theta)
    }
}

/// Closed-form trajectory for one (particle, launch, fields) triple
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticalSolution {
    v0x: f64,
    v0y: f64,
    accel: f64, // qE/m
    omega: f64, // qB/m
    regime: Regime,
}

impl AnalyticalSolution {
    pub fn new(
        particle: &ParticleParameters,
        v0: f64,
        theta: f64,
        fields: &FieldScalars,
    ) -> Result<Self> {
        particle.validate()?;
        ensure_finite("initial speed", v0)?;
        ensure_finite("launch angle", theta)?;
        ensure_finite("electric field", fields.e)?;
        ensure_finite("magnetic field", fields.b)?;

        let accel = particle.specific_charge() * fields.e;
        let omega = cyclotron_frequency(particle, fields.b);

        let regime = if fields.b == 0.0 {
            Regime::UniformElectric
        } else if fields.e == 0.0 {
            Regime::Cyclotron
        } else {
            Regime::CrossedDrift
        };

        Ok(Self {
            v0x: v0 * theta.cos(),
            v0y: v0 * theta.sin(),
            accel,
            omega,
            regime,
        })
    }

    pub fn regime(&self) -> Regime {
        self.regime
    }

    /// ω = qB/m, zero in the uniform-electric regime
    pub fn omega(&self) -> f64 {
        match self.regime {
            Regime::UniformElectric => 0.0,
            _ => self.omega,
        }
    }

    /// Guiding-centre drift velocity (E/B along -y), zero when B = 0
    pub fn drift_velocity(&self) -> NVec3 {
        match self.regime {
            Regime::UniformElectric => NVec3::zeros(),
            _ => NVec3::new(0.0, -self.accel / self.omega, 0.0),
        }
    }

    /// Position, velocity and acceleration at time `t`
    pub fn solve_at(&self, t: f64) -> Sample {
        let (v0x, v0y, a) = (self.v0x, self.v0y, self.accel);

        let (position, velocity, acceleration) = match self.regime {
            Regime::UniformElectric => (
                NVec3::new(v0x * t + 0.5 * a * t * t, v0y * t, 0.0),
                NVec3::new(v0x + a * t, v0y, 0.0),
                NVec3::new(a, 0.0, 0.0),
            ),
            Regime::Cyclotron | Regime::CrossedDrift => {
                let w = self.omega;
                let theta = w * t;
                let (sin, cos) = theta.sin_cos();
                let half = sinc(0.5 * theta);

                let s1 = t * sinc(theta); // sin θ / ω
                let c2 = 0.5 * t * t * half * half; // (1 - cos θ) / ω²
                let c1 = w * c2; // (1 - cos θ) / ω
                let d2 = t * t * theta_minus_sin_scaled(theta); // (θ - sin θ) / ω²

                let vx = v0x * cos + v0y * sin + a * s1;
                let vy = v0y * cos - v0x * sin - a * c1;

                (
                    NVec3::new(v0x * s1 + v0y * c1 + a * c2, v0y * s1 - v0x * c1 - a * d2, 0.0),
                    NVec3::new(vx, vy, 0.0),
                    NVec3::new(a + w * vy, -w * vx, 0.0),
                )
            }
        };

        Sample {
            t,
            position,
            velocity,
            acceleration,
        }
    }

    /// Lazily evaluate every time in `times`, in order
    pub fn samples<'a, I>(&'a self, times: I) -> impl Iterator<Item = Sample> + 'a
    where
        I: IntoIterator<Item = f64>,
        I::IntoIter: 'a,
    {
        times.into_iter().map(move |t| self.solve_at(t))
    }
}

/// Check that `t_array` is a usable time axis
pub fn validate_times(t_array: &[f64]) -> Result<()> {
    if t_array.is_empty() {
        return Err(InvalidConfiguration::EmptyTimeArray);
    }
    for (index, pair) in t_array.windows(2).enumerate() {
        if !(pair[1] > pair[0]) {
            return Err(InvalidConfiguration::NonMonotonicTimeArray {
                index: index + 1,
                t: pair[1],
            });
        }
    }
    t_array.iter().try_for_each(|&t| ensure_finite("time", t))
}

/// Closed-form trajectory sampled at every entry of `t_array`
///
/// Always returns exactly `t_array.len()` samples with
/// `TerminationReason::Completed`. There is no boundary check.
pub fn analytical(
    particle: &ParticleParameters,
    v0: f64,
    theta: f64,
    fields: &FieldScalars,
    t_array: &[f64],
) -> Result<Trajectory> {
    validate_times(t_array)?;
    let solution = AnalyticalSolution::new(particle, v0, theta, fields)?;

    debug!(
        "analytical run: {:?}, {} samples, t_end = {:e} s",
        solution.regime(),
        t_array.len(),
        t_array[t_array.len() - 1]
    );

    let mut trajectory = Trajectory::with_capacity(t_array.len(), TerminationReason::Completed);
    for sample in solution.samples(t_array.iter().copied()) {
        trajectory.push(sample);
    }
    Ok(trajectory)
}
