use rand::Rng;
use tracing::debug;

use crate::domain::types::Candidate;
use crate::solver::aco::space::ParameterSpace;

/// Draw the first generation: every parameter on a uniformly random step.
pub fn initial_population<R: Rng + ?Sized>(
    space: &ParameterSpace,
    population_size: usize,
    rng: &mut R,
) -> Vec<Candidate> {
    let population: Vec<Candidate> = (0..population_size)
        .map(|_| Candidate::new(space.random_vector(rng)))
        .collect();

    debug!(
        "Initial population of {} candidates over {} parameters",
        population.len(),
        space.len()
    );

    population
}
