//! Reference reflectance evaluator for a perforated dielectric slab.
//!
//! The patterned layer is collapsed to its area-averaged permittivity and the
//! reflectance of that single homogeneous layer in air follows the Airy
//! formula at normal incidence. Frequencies are in units of 2πc/a, lengths in
//! units of the lattice period a.

use crate::domain::{EvaluationFailure, Sample, SweepError, SweepResult};
use crate::evaluator::Evaluator;
use num_complex::Complex64;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlabReflectance {
    permittivity: f64,
    hole_radius: f64,
    thickness: f64,
}

impl Default for SlabReflectance {
    fn default() -> Self {
        Self {
            permittivity: 12.0,
            hole_radius: 0.1,
            thickness: 0.5,
        }
    }
}

impl SlabReflectance {
    pub fn new(permittivity: f64, hole_radius: f64, thickness: f64) -> SweepResult<Self> {
        if !(permittivity.is_finite() && permittivity >= 1.0) {
            return Err(SweepError::config(format!(
                "slab permittivity must be finite and >= 1, got {permittivity}"
            )));
        }
        if !(hole_radius.is_finite() && (0.0..=0.5).contains(&hole_radius)) {
            return Err(SweepError::config(format!(
                "hole radius must lie in [0, 0.5] lattice periods, got {hole_radius}"
            )));
        }
        if !(thickness.is_finite() && thickness > 0.0) {
            return Err(SweepError::config(format!(
                "slab thickness must be positive, got {thickness}"
            )));
        }
        Ok(Self {
            permittivity,
            hole_radius,
            thickness,
        })
    }

    pub fn fill_fraction(&self) -> f64 {
        PI * self.hole_radius * self.hole_radius
    }

    pub fn effective_permittivity(&self) -> f64 {
        let air = self.fill_fraction();
        air + (1.0 - air) * self.permittivity
    }

    pub fn reflectance(&self, frequency: f64) -> Result<f64, EvaluationFailure> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(EvaluationFailure::new(format!(
                "frequency must be finite and positive, got {frequency}"
            )));
        }

        let index = Complex64::new(self.effective_permittivity(), 0.0).sqrt();
        let one = Complex64::new(1.0, 0.0);
        let interface = (one - index) / (one + index);
        let phase = index * (2.0 * PI * frequency * self.thickness);
        let round_trip = (Complex64::i() * phase * 2.0).exp();

        let amplitude =
            interface * (one - round_trip) / (one - interface * interface * round_trip);
        let reflectance = amplitude.norm_sqr();
        if !reflectance.is_finite() {
            return Err(EvaluationFailure::new(format!(
                "reflectance is not finite at frequency {frequency}"
            )));
        }
        Ok(reflectance)
    }
}

impl Evaluator for SlabReflectance {
    fn evaluate(&self, sample: &Sample) -> Result<f64, EvaluationFailure> {
        self.reflectance(sample.input)
    }

    fn name(&self) -> &str {
        "slab-reflectance"
    }
}
