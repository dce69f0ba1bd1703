//! Configuration errors.
//!
//! Every precondition is checked before a run starts; a run that has begun
//! never fails. Physical boundary conditions (speed reaching c) are reported
//! on the returned trajectory instead, see [`crate::SpeedLimitBreach`].

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidConfiguration {
    #[error("time step must be positive, got dt = {0:e} s")]
    NonPositiveTimeStep(f64),

    #[error("particle mass must be positive, got m = {0:e} kg")]
    NonPositiveMass(f64),

    #[error("step budget must be at least one step")]
    ZeroStepBudget,

    #[error("boundary must be positive when set, got {0:e} m")]
    NonPositiveBoundary(f64),

    #[error("time array is empty")]
    EmptyTimeArray,

    #[error("time array must be strictly increasing (index {index}: {t:e} s)")]
    NonMonotonicTimeArray { index: usize, t: f64 },

    #[error("lorentz factor ceiling must be finite and >= 1, got {0}")]
    InvalidGammaCeiling(f64),

    #[error("scenario has no `{0}` section, which its solver requires")]
    MissingSection(&'static str),

    #[error("analytical solver needs E along x and B along z from the origin, got {0}")]
    UnsupportedAnalyticalLayout(&'static str),

    #[error("{name} must be finite")]
    NonFinite { name: &'static str },
}

pub type Result<T> = std::result::Result<T, InvalidConfiguration>;

/// Reject NaN and infinities in a named input
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InvalidConfiguration::NonFinite { name })
    }
}
