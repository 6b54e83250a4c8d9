use rand::Rng;

use crate::config::constant::PROBABILITY_EPSILON;
use crate::domain::types::{AcoParams, Candidate, Fitness};
use crate::solver::aco::pheromone::PheromoneModel;
use crate::solver::aco::space::ParameterSpace;
use crate::utils::{argmax_first, normalise_or_uniform, roulette_wheel_selection};

/// Step probabilities for one parameter under the current trails.
pub fn step_probabilities(model: &PheromoneModel, param: usize, alpha: f64, beta: f64) -> Vec<f64> {
    let mut probabilities = model.desirability(param, alpha, beta);
    normalise_or_uniform(&mut probabilities, PROBABILITY_EPSILON);
    probabilities
}

/// Pseudo-random proportional rule: exploit the most probable step with
/// probability `q0`, otherwise sample by roulette wheel.
pub fn choose_step<R: Rng + ?Sized>(probabilities: &[f64], q0: f64, rng: &mut R) -> usize {
    if rng.gen::<f64>() < q0 {
        argmax_first(probabilities)
    } else {
        roulette_wheel_selection(probabilities, rng)
    }
}

/// Rebuild `candidate` in place, one step per parameter.
pub fn construct_candidate<R: Rng + ?Sized>(
    candidate: &mut Candidate,
    space: &ParameterSpace,
    model: &PheromoneModel,
    params: &AcoParams,
    rng: &mut R,
) {
    candidate.params.resize(space.len(), 0.0);
    let mut joint_probability = 1.0;

    for (param, bounds) in space.iter().enumerate() {
        let probabilities = step_probabilities(model, param, params.alpha, params.beta);
        let step = choose_step(&probabilities, params.q0, rng);
        joint_probability *= probabilities[step];
        candidate.params[param] = bounds.value(step);
    }

    candidate.probability = joint_probability;
    candidate.fitness = Fitness::Unevaluable;
}
