//! Trajectory buffer and run annotations
//!
//! A `Trajectory` is the append-only, time-ordered record of one run. Only the
//! solvers in this crate can append to it; callers get read access plus the
//! annotations describing how the run ended and whether the relativistic
//! kinematics left the physical domain.

use serde::{Deserialize, Serialize};

use crate::simulation::states::Sample;

/// Why a run stopped. None of these are errors.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The integrator used its whole step budget
    StepBudgetExhausted,
    /// The particle crossed the square boundary on |x| or |y|
    BoundaryExit,
    /// Every requested sample was produced (analytical runs)
    Completed,
    /// A caller-supplied stop condition ended the run
    Cancelled,
}

/// Record of the speed reaching c under relativistic kinematics.
/// Samples from `first_time` on were computed with a capped Lorentz factor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SpeedLimitBreach {
    pub first_time: f64,    // s, start of the first step with a capped γ
    pub evaluations: usize, // initial evaluation plus RK4 steps that capped γ
}

impl SpeedLimitBreach {
    pub(crate) fn record(slot: &mut Option<SpeedLimitBreach>, t: f64) {
        let breach = slot.get_or_insert(SpeedLimitBreach {
            first_time: t,
            evaluations: 0,
        });
        breach.evaluations += 1;
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
    pub termination: TerminationReason,
    pub speed_limit: Option<SpeedLimitBreach>,
}

impl Trajectory {
    pub(crate) fn with_capacity(capacity: usize, termination: TerminationReason) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            termination,
            speed_limit: None,
        }
    }

    pub(crate) fn push(&mut self, sample: Sample) {
        debug_assert!(
            self.samples.last().map_or(true, |last| sample.t > last.t),
            "samples must be appended in increasing time order"
        );
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// True when no relativistic evaluation had to cap the Lorentz factor
    pub fn is_physical(&self) -> bool {
        self.speed_limit.is_none()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
