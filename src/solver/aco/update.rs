use crate::config::constant::{ELITIST_FACTOR, MIN_DEPOSIT_FITNESS};
use crate::domain::types::{Candidate, Fitness};
use crate::solver::aco::pheromone::PheromoneModel;
use crate::solver::aco::space::ParameterSpace;

/// Reinforcement earned by a score; unevaluable candidates earn nothing.
fn deposit_amount(fitness: Fitness) -> Option<f64> {
    fitness.value().map(|f| 1.0 / f.max(MIN_DEPOSIT_FITNESS))
}

fn deposit_along(model: &mut PheromoneModel, space: &ParameterSpace, params: &[f64], amount: f64) {
    for (param, (bounds, &value)) in space.iter().zip(params).enumerate() {
        model.deposit(param, bounds.nearest_step(value), amount);
    }
}

/// Evaporate every trail, let each ant deposit 1/fitness on its steps, then
/// reinforce the global best with `ELITIST_FACTOR`/fitness.
pub fn update_pheromones(
    model: &mut PheromoneModel,
    space: &ParameterSpace,
    population: &[Candidate],
    global_best: Option<&Candidate>,
    evaporation_rate: f64,
) {
    model.evaporate(evaporation_rate);

    for candidate in population {
        if let Some(amount) = deposit_amount(candidate.fitness) {
            deposit_along(model, space, &candidate.params, amount);
        }
    }

    if let Some(best) = global_best {
        if let Some(amount) = deposit_amount(best.fitness) {
            deposit_along(model, space, &best.params, ELITIST_FACTOR * amount);
        }
    }
}
