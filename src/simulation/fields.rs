//! Electric and magnetic field sources
//!
//! Fields are exposed as pure functions of `(t, position)` so the integrator
//! never needs to know whether they are uniform. `FieldConfig` is the uniform,
//! time-invariant case; `FieldSet` superposes any number of sources.

use serde::{Deserialize, Serialize};

use crate::error::{InvalidConfiguration, Result};
use crate::simulation::states::NVec3;

/// Trait for field sources
/// E in V/m, B in tesla
pub trait FieldModel {
    fn electric(&self, t: f64, position: &NVec3) -> NVec3;
    fn magnetic(&self, t: f64, position: &NVec3) -> NVec3;
}

/// Spatially and temporally uniform fields
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldConfig {
    pub e: NVec3, // V/m
    pub b: NVec3, // T
}

impl FieldConfig {
    pub fn new(e: NVec3, b: NVec3) -> Self {
        Self { e, b }
    }

    /// In-plane E along +x and B along +z, the layout the analytical solver assumes
    pub fn crossed(e: f64, b: f64) -> Self {
        Self {
            e: NVec3::new(e, 0.0, 0.0),
            b: NVec3::new(0.0, 0.0, b),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.e.iter().all(|c| c.is_finite()) {
            return Err(InvalidConfiguration::NonFinite { name: "electric field" });
        }
        if !self.b.iter().all(|c| c.is_finite()) {
            return Err(InvalidConfiguration::NonFinite { name: "magnetic field" });
        }
        Ok(())
    }
}

impl FieldModel for FieldConfig {
    fn electric(&self, _t: f64, _position: &NVec3) -> NVec3 {
        self.e
    }

    fn magnetic(&self, _t: f64, _position: &NVec3) -> NVec3 {
        self.b
    }
}

/// Superposition of field sources
/// Each term implements [`FieldModel`] and their contributions are summed
pub struct FieldSet {
    terms: Vec<Box<dyn FieldModel + Send + Sync>>,
}

impl FieldSet {
    /// Create an empty field set (zero field everywhere)
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a field source
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: FieldModel + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldModel for FieldSet {
    fn electric(&self, t: f64, position: &NVec3) -> NVec3 {
        self.terms
            .iter()
            .fold(NVec3::zeros(), |acc, term| acc + term.electric(t, position))
    }

    fn magnetic(&self, t: f64, position: &NVec3) -> NVec3 {
        self.terms
            .iter()
            .fold(NVec3::zeros(), |acc, term| acc + term.magnetic(t, position))
    }
}
