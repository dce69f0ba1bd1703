//! Fixed-step RK4 integration of a single charged particle
//!
//! Provides the single-step `rk4_step`, a lazy `TrajectoryStream` that yields
//! samples one step at a time, and the batch entry points `integrate` /
//! `integrate_until` that drain a stream into a `Trajectory`. All of them are
//! driven by `Kinematics`, a `FieldModel` and `IntegrationConfig`.

use log::{debug, info, warn};

use crate::error::Result;
use crate::simulation::fields::FieldModel;
use crate::simulation::forces::{acceleration, AccelEval, Acceleration};
use crate::simulation::params::{IntegrationConfig, ParticleParameters};
use crate::simulation::states::{ParticleState, Sample};
use crate::simulation::trajectory::{SpeedLimitBreach, TerminationReason, Trajectory};

// Upper bound on the up-front sample allocation; longer runs grow the buffer
const PREALLOC_SAMPLES: usize = 1 << 16;

/// Outcome of one RK4 step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rk4Step {
    pub state: ParticleState, // state at t + dt
    pub start: AccelEval,     // acceleration at the start of the step (k1)
    pub clamped: bool,        // any of the four stages capped γ
}

/// Advance `state` from `t` to `t + dt` with classical 4th-order Runge-Kutta
///
/// Position and velocity are advanced jointly with dr/dt = v and
/// dv/dt = a(t, r, v). Fields are sampled at each stage's time and position,
/// so for uniform fields this is exactly RK4 on a(v).
pub fn rk4_step<A, F>(
    law: &A,
    particle: &ParticleParameters,
    state: &ParticleState,
    fields: &F,
    t: f64,
    dt: f64,
) -> Rk4Step
where
    A: Acceleration + ?Sized,
    F: FieldModel + ?Sized,
{
    let half_dt = 0.5 * dt; // half step dt/2
    let r = state.position;
    let v = state.velocity;

    // k1 from the state at t
    let a1 = acceleration(law, particle, state, fields, t);
    let k1_v = dt * a1.value;
    let k1_r = dt * v;

    // k2 from the midpoint predicted by k1
    let s2 = ParticleState::new(r + 0.5 * k1_r, v + 0.5 * k1_v);
    let a2 = acceleration(law, particle, &s2, fields, t + half_dt);
    let k2_v = dt * a2.value;
    let k2_r = dt * s2.velocity;

    // k3 from the midpoint predicted by k2
    let s3 = ParticleState::new(r + 0.5 * k2_r, v + 0.5 * k2_v);
    let a3 = acceleration(law, particle, &s3, fields, t + half_dt);
    let k3_v = dt * a3.value;
    let k3_r = dt * s3.velocity;

    // k4 from the end point predicted by k3
    let s4 = ParticleState::new(r + k3_r, v + k3_v);
    let a4 = acceleration(law, particle, &s4, fields, t + dt);
    let k4_v = dt * a4.value;
    let k4_r = dt * s4.velocity;

    let velocity = v + (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) / 6.0;
    let position = r + (k1_r + 2.0 * k2_r + 2.0 * k3_r + k4_r) / 6.0;

    Rk4Step {
        state: ParticleState::new(position, velocity),
        start: a1,
        clamped: a1.clamped || a2.clamped || a3.clamped || a4.clamped,
    }
}

/// Extra stopping predicate checked after the step budget and boundary checks
pub trait StopCondition {
    fn should_stop(&mut self, sample: &Sample) -> bool;
}

impl<P> StopCondition for P
where
    P: FnMut(&Sample) -> bool,
{
    fn should_stop(&mut self, sample: &Sample) -> bool {
        self(sample)
    }
}

/// Stop condition that never fires
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStop;

impl StopCondition for NeverStop {
    fn should_stop(&mut self, _sample: &Sample) -> bool {
        false
    }
}

/// Lazy, finite, single-pass sequence of samples
///
/// The first item is the initial condition at t = 0. Every following item is
/// one accepted RK4 step. Once the stopping policy fires, the crossing sample
/// is still yielded and the stream ends; `termination()` then reports why.
/// Dropping the stream early leaves no shared state behind.
pub struct TrajectoryStream<'a, F: ?Sized, S = NeverStop> {
    particle: ParticleParameters,
    fields: &'a F,
    config: IntegrationConfig,
    stop: S,
    state: ParticleState,
    steps: usize,
    started: bool,
    termination: Option<TerminationReason>,
    speed_limit: Option<SpeedLimitBreach>,
}

impl<'a, F, S> TrajectoryStream<'a, F, S>
where
    F: FieldModel + ?Sized,
    S: StopCondition,
{
    /// Current live state. Feed it back as `initial_state` to resume a run.
    pub fn state(&self) -> ParticleState {
        self.state
    }

    /// Number of RK4 steps taken so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// `Some` once the stream is exhausted
    pub fn termination(&self) -> Option<TerminationReason> {
        self.termination
    }

    pub fn speed_limit(&self) -> Option<SpeedLimitBreach> {
        self.speed_limit
    }

    fn note_clamped(&mut self, t: f64) {
        if self.speed_limit.is_none() {
            warn!(
                "speed reached c at t = {:e} s; lorentz factor capped, results are non-physical from here",
                t
            );
        }
        SpeedLimitBreach::record(&mut self.speed_limit, t);
    }

    fn outside_boundary(&self) -> bool {
        match self.config.boundary {
            Some(boundary) => {
                self.state.position.x.abs() > boundary || self.state.position.y.abs() > boundary
            }
            None => false,
        }
    }
}

impl<'a, F, S> Iterator for TrajectoryStream<'a, F, S>
where
    F: FieldModel + ?Sized,
    S: StopCondition,
{
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.termination.is_some() {
            return None;
        }

        let law = self.config.kinematics;

        // Initial condition at t = 0
        if !self.started {
            self.started = true;
            let a0 = acceleration(&law, &self.particle, &self.state, self.fields, 0.0);
            if a0.clamped {
                self.note_clamped(0.0);
            }
            return Some(Sample {
                t: 0.0,
                position: self.state.position,
                velocity: self.state.velocity,
                acceleration: a0.value,
            });
        }

        let dt = self.config.dt;
        let t_start = self.steps as f64 * dt;
        let step = rk4_step(&law, &self.particle, &self.state, self.fields, t_start, dt);
        if step.clamped {
            self.note_clamped(t_start);
        }

        self.state = step.state;
        self.steps += 1;

        let sample = Sample {
            t: self.steps as f64 * dt,
            position: self.state.position,
            velocity: self.state.velocity,
            acceleration: step.start.value,
        };

        // Stopping policy, in order: budget, boundary, caller predicate
        if self.steps >= self.config.max_steps {
            self.termination = Some(TerminationReason::StepBudgetExhausted);
        } else if self.outside_boundary() {
            self.termination = Some(TerminationReason::BoundaryExit);
        } else if self.stop.should_stop(&sample) {
            self.termination = Some(TerminationReason::Cancelled);
        }

        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.termination.is_some() {
            return (0, Some(0));
        }
        let pending_initial = usize::from(!self.started);
        let remaining = self.config.max_steps - self.steps + pending_initial;
        (1.min(remaining), Some(remaining))
    }
}

/// Validate a run and return a lazy sample stream without a caller predicate
pub fn stream<'a, F>(
    particle: &ParticleParameters,
    initial_state: &ParticleState,
    fields: &'a F,
    config: &IntegrationConfig,
) -> Result<TrajectoryStream<'a, F>>
where
    F: FieldModel + ?Sized,
{
    stream_until(particle, initial_state, fields, config, NeverStop)
}

/// Validate a run and return a lazy sample stream that also ends when `stop` fires
pub fn stream_until<'a, F, S>(
    particle: &ParticleParameters,
    initial_state: &ParticleState,
    fields: &'a F,
    config: &IntegrationConfig,
    stop: S,
) -> Result<TrajectoryStream<'a, F, S>>
where
    F: FieldModel + ?Sized,
    S: StopCondition,
{
    particle.validate()?;
    initial_state.validate()?;
    config.validate()?;

    debug!(
        "rk4 run: q = {:e} C, m = {:e} kg, dt = {:e} s, max_steps = {}, boundary = {:?}, {:?}",
        particle.charge, particle.mass, config.dt, config.max_steps, config.boundary, config.kinematics
    );

    Ok(TrajectoryStream {
        particle: *particle,
        fields,
        config: *config,
        stop,
        state: *initial_state,
        steps: 0,
        started: false,
        termination: None,
        speed_limit: None,
    })
}

/// Integrate until the step budget is used or the particle leaves the boundary
pub fn integrate<F>(
    particle: &ParticleParameters,
    initial_state: &ParticleState,
    fields: &F,
    config: &IntegrationConfig,
) -> Result<Trajectory>
where
    F: FieldModel + ?Sized,
{
    integrate_until(particle, initial_state, fields, config, NeverStop)
}

/// Same as [`integrate`], with an additional caller-supplied stop condition
pub fn integrate_until<F, S>(
    particle: &ParticleParameters,
    initial_state: &ParticleState,
    fields: &F,
    config: &IntegrationConfig,
    stop: S,
) -> Result<Trajectory>
where
    F: FieldModel + ?Sized,
    S: StopCondition,
{
    let mut stream = stream_until(particle, initial_state, fields, config, stop)?;

    let capacity = config.max_steps.saturating_add(1).min(PREALLOC_SAMPLES);
    let mut trajectory = Trajectory::with_capacity(capacity, TerminationReason::StepBudgetExhausted);
    for sample in stream.by_ref() {
        trajectory.push(sample);
    }

    if let Some(reason) = stream.termination() {
        trajectory.termination = reason;
    }
    trajectory.speed_limit = stream.speed_limit();

    info!(
        "rk4 run finished: {:?} after {} steps ({} samples)",
        trajectory.termination,
        stream.steps(),
        trajectory.len()
    );

    Ok(trajectory)
}
