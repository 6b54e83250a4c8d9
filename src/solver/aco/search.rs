use itertools::Itertools;
use rand::Rng;
use tracing::{debug, info, span, trace, Level};

use crate::domain::types::{Candidate, Fitness, PressureComparison, RunConfig};
use crate::error::ConfigError;
use crate::evaluation::fitness::evaluate_fitness;
use crate::hydraulics::simulator::HydraulicSimulator;
use crate::setup::init::initial_population;
use crate::setup::validate::validate_config;

use super::construction::construct_candidate;
use super::monitor::{GenerationSnapshot, SearchCommand, SearchMonitor};
use super::pheromone::PheromoneModel;
use super::space::ParameterSpace;
use super::update::update_pheromones;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    BudgetExhausted,
    Terminated(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EstimationResult {
    pub best_params: Vec<f64>,
    pub best_fitness: Fitness,
    pub generations_run: usize,
    pub stop_reason: StopReason,
    pub history: Vec<GenerationSnapshot>,
    /// Simulated vs observed pressure per node, re-simulated with `best_params`.
    pub pressures: Vec<PressureComparison>,
}

/// One ant-colony run over a validated configuration. Owns all search state.
pub struct AcoSearch<R: Rng> {
    config: RunConfig,
    space: ParameterSpace,
    simulator: HydraulicSimulator,
    model: PheromoneModel,
    population: Vec<Candidate>,
    best: Option<Candidate>,
    rng: R,
}

impl<R: Rng> AcoSearch<R> {
    /// Validate `config` and set up the initial population and trails.
    pub fn new(config: RunConfig, mut rng: R) -> Result<Self, ConfigError> {
        validate_config(&config)?;

        let setup_span = span!(Level::INFO, "setup", formula = %config.formula);
        let _guard = setup_span.enter();

        let simulator = HydraulicSimulator::new(&config.network)?;
        let space = ParameterSpace::new(config.aco.bounds.clone());
        let model = PheromoneModel::new(&space, config.aco.tau0);
        let population = initial_population(&space, config.aco.population_size, &mut rng);

        info!(
            "Search ready: {} candidates, {} parameters, {} generations",
            config.aco.population_size, config.aco.num_params, config.aco.max_generations
        );

        Ok(Self {
            config,
            space,
            simulator,
            model,
            population,
            best: None,
            rng,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn population(&self) -> &[Candidate] {
        &self.population
    }

    pub fn pheromones(&self) -> &PheromoneModel {
        &self.model
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.best.as_ref()
    }

    /// Run generations until the budget is spent or `monitor` asks to stop.
    pub fn run<M: SearchMonitor + ?Sized>(mut self, monitor: &mut M) -> EstimationResult {
        let max_generations = self.config.aco.max_generations;
        let loop_span = span!(
            Level::INFO,
            "aco_search",
            formula = %self.config.formula,
            total_generations = max_generations
        );
        let _loop_guard = loop_span.enter();

        let mut history = Vec::with_capacity(max_generations);
        let mut stop_reason = StopReason::BudgetExhausted;

        for generation in 0..max_generations {
            let improved = self.step(generation);

            let snapshot = GenerationSnapshot {
                generation,
                best_fitness: self.best_fitness(),
                improved,
            };
            monitor.on_generation(&snapshot);
            history.push(snapshot);

            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                info!(
                    "{} stopped the search after generation {}: {}",
                    monitor.name(),
                    generation,
                    reason
                );
                stop_reason = StopReason::Terminated(reason);
                break;
            }
        }

        self.finish(history, stop_reason)
    }

    /// Evaluate, update the trails, then rebuild the population.
    /// Returns whether the global best improved.
    pub fn step(&mut self, generation: usize) -> bool {
        let improved = self.evaluate_population(generation);

        update_pheromones(
            &mut self.model,
            &self.space,
            &self.population,
            self.best.as_ref(),
            self.config.aco.evaporation_rate,
        );

        for candidate in &mut self.population {
            construct_candidate(
                candidate,
                &self.space,
                &self.model,
                &self.config.aco,
                &mut self.rng,
            );
        }

        improved
    }

    fn best_fitness(&self) -> Fitness {
        self.best
            .as_ref()
            .map_or(Fitness::Unevaluable, |best| best.fitness)
    }

    fn evaluate_population(&mut self, generation: usize) -> bool {
        let mut improved = false;

        for candidate in &mut self.population {
            let result = self.simulator.relax(&candidate.params, self.config.formula);
            candidate.fitness = evaluate_fitness(self.simulator.network(), &result.pressures);
            trace!(
                "Candidate [{}] (p = {:.3e}) -> {} ({} sweeps)",
                candidate.params.iter().join(", "),
                candidate.probability,
                candidate.fitness,
                result.sweeps
            );

            let replace = match &self.best {
                None => true,
                Some(best) => candidate.fitness.is_better_than(best.fitness),
            };
            if replace {
                // Only the very first candidate can replace without a score.
                improved |= candidate.fitness.value().is_some();
                self.best = Some(candidate.clone());
            }
        }

        if improved {
            info!(
                "New best at generation {}: fitness = {}",
                generation,
                self.best_fitness()
            );
        } else {
            debug!("Generation {}: no improvement", generation);
        }

        improved
    }

    fn finish(self, history: Vec<GenerationSnapshot>, stop_reason: StopReason) -> EstimationResult {
        // The first generation always runs, so a best exists.
        let best = self
            .best
            .unwrap_or_else(|| Candidate::new(self.population[0].params.clone()));

        let final_run = self.simulator.relax(&best.params, self.config.formula);
        let pressures = self.simulator.compare(&final_run);

        info!(
            "Optimization complete after {} generations. Best fitness {}",
            history.len(),
            best.fitness
        );

        EstimationResult {
            best_params: best.params,
            best_fitness: best.fitness,
            generations_run: history.len(),
            stop_reason,
            history,
            pressures,
        }
    }
}
