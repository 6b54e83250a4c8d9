use rand::Rng;

use crate::config::constant::{MAX_STEPS, STEP_ROUNDING_SLACK};
use crate::domain::types::ParamBounds;

impl ParamBounds {
    /// Highest valid step index: floor((max - min) / discretization), capped
    /// so that a row never holds more than `MAX_STEPS` slots.
    pub fn step_count(&self) -> usize {
        let raw = (self.max - self.min) / self.discretization;
        if !raw.is_finite() || raw <= 0.0 {
            return 0;
        }
        let steps = (raw + raw * STEP_ROUNDING_SLACK).floor() as usize;
        steps.min(MAX_STEPS - 1)
    }

    /// Number of slots in the pheromone and heuristic rows, `0..=step_count`.
    pub fn slot_count(&self) -> usize {
        self.step_count() + 1
    }

    pub fn value(&self, index: usize) -> f64 {
        self.min + index as f64 * self.discretization
    }

    /// Round-half-up to the closest step, clamped into the valid range.
    pub fn nearest_step(&self, value: f64) -> usize {
        let k = ((value - self.min) / self.discretization + 0.5).floor();
        if k.is_nan() || k <= 0.0 {
            return 0;
        }
        (k as usize).min(self.step_count())
    }

    pub fn midpoint(&self) -> f64 {
        (self.max + self.min) / 2.0
    }
}

/// The discretized search space, one dimension per estimated pipe.
#[derive(Debug, Clone)]
pub struct ParameterSpace {
    bounds: Vec<ParamBounds>,
}

impl ParameterSpace {
    pub fn new(bounds: Vec<ParamBounds>) -> Self {
        Self { bounds }
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn bounds(&self, param: usize) -> &ParamBounds {
        &self.bounds[param]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParamBounds> {
        self.bounds.iter()
    }

    /// A parameter vector with every value on a uniformly drawn step.
    pub fn random_vector<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        self.bounds
            .iter()
            .map(|b| b.value(rng.gen_range(0..b.slot_count())))
            .collect()
    }
}
