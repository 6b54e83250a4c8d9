use crate::config::constant::{
    MAX_GENERATIONS, MAX_NODES, MAX_PARAMS, MAX_PIPES, MAX_POPULATION,
};
use crate::domain::types::RunConfig;
use crate::error::ConfigError;

fn check_limit(what: &'static str, value: usize, limit: usize) -> Result<(), ConfigError> {
    if value > limit {
        return Err(ConfigError::LimitExceeded { what, value, limit });
    }
    Ok(())
}

fn check_hyperparameter(
    name: &'static str,
    value: f64,
    valid: impl Fn(f64) -> bool,
) -> Result<(), ConfigError> {
    if value.is_finite() && valid(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidHyperparameter { name, value })
    }
}

/// Reject a configuration before any search state is built.
pub fn validate_config(config: &RunConfig) -> Result<(), ConfigError> {
    let network = &config.network;
    let aco = &config.aco;

    check_limit("node count", network.nodes.len(), MAX_NODES)?;
    check_limit("pipe count", network.pipes.len(), MAX_PIPES)?;
    check_limit("population size", aco.population_size, MAX_POPULATION)?;
    check_limit("parameter count", aco.num_params, MAX_PARAMS)?;
    check_limit("generation budget", aco.max_generations, MAX_GENERATIONS)?;

    network.validate_topology()?;

    if aco.num_params != network.pipes.len() {
        return Err(ConfigError::ParameterCountMismatch {
            params: aco.num_params,
            pipes: network.pipes.len(),
        });
    }
    if aco.bounds.len() != aco.num_params {
        return Err(ConfigError::BoundsCountMismatch {
            expected: aco.num_params,
            actual: aco.bounds.len(),
        });
    }

    for (index, b) in aco.bounds.iter().enumerate() {
        let reason = if !(b.min.is_finite() && b.max.is_finite() && b.discretization.is_finite()) {
            Some("values must be finite")
        } else if b.min > b.max {
            Some("min is greater than max")
        } else if b.discretization <= 0.0 {
            Some("discretization must be positive")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(ConfigError::InvalidBounds {
                index,
                reason: reason.to_string(),
            });
        }
    }

    if aco.population_size == 0 {
        return Err(ConfigError::InvalidHyperparameter {
            name: "population_size",
            value: 0.0,
        });
    }
    if aco.max_generations == 0 {
        return Err(ConfigError::InvalidHyperparameter {
            name: "max_generations",
            value: 0.0,
        });
    }
    check_hyperparameter("evaporation_rate", aco.evaporation_rate, |v| v > 0.0 && v <= 1.0)?;
    check_hyperparameter("q0", aco.q0, |v| (0.0..=1.0).contains(&v))?;
    check_hyperparameter("tau0", aco.tau0, |v| v > 0.0)?;
    check_hyperparameter("alpha", aco.alpha, |v| v >= 0.0)?;
    check_hyperparameter("beta", aco.beta, |v| v >= 0.0)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::FlowFormula;
    use crate::fixtures::example_network::example_run_config;

    fn config() -> RunConfig {
        example_run_config(FlowFormula::HazenWilliams)
    }

    #[test]
    fn test_example_config_is_valid() {
        for formula in FlowFormula::ALL {
            assert_eq!(validate_config(&example_run_config(formula)), Ok(()));
        }
    }

    #[test]
    fn test_parameter_count_mismatch() {
        let mut c = config();
        c.aco.num_params = 4;
        c.aco.bounds.pop();
        assert_eq!(
            validate_config(&c),
            Err(ConfigError::ParameterCountMismatch { params: 4, pipes: 5 })
        );
    }

    #[test]
    fn test_bounds_count_mismatch() {
        let mut c = config();
        c.aco.bounds.truncate(3);
        assert_eq!(
            validate_config(&c),
            Err(ConfigError::BoundsCountMismatch { expected: 5, actual: 3 })
        );
    }

    #[test]
    fn test_invalid_bounds() {
        let mut c = config();
        c.aco.bounds[2].discretization = 0.0;
        assert!(matches!(
            validate_config(&c),
            Err(ConfigError::InvalidBounds { index: 2, .. })
        ));

        let mut c = config();
        c.aco.bounds[0].min = 150.0;
        assert!(matches!(
            validate_config(&c),
            Err(ConfigError::InvalidBounds { index: 0, .. })
        ));

        let mut c = config();
        c.aco.bounds[4].max = f64::NAN;
        assert!(matches!(
            validate_config(&c),
            Err(ConfigError::InvalidBounds { index: 4, .. })
        ));
    }

    #[test]
    fn test_dangling_pipe_is_rejected() {
        let mut c = config();
        c.network.pipes[3].from_node = 17;
        assert_eq!(
            validate_config(&c),
            Err(ConfigError::InvalidTopologyReference { pipe: 4, node: 17 })
        );
    }

    #[test]
    fn test_limits() {
        let mut c = config();
        c.aco.population_size = MAX_POPULATION + 1;
        assert!(matches!(
            validate_config(&c),
            Err(ConfigError::LimitExceeded { what: "population size", .. })
        ));

        let mut c = config();
        c.aco.max_generations = MAX_GENERATIONS + 1;
        assert!(matches!(
            validate_config(&c),
            Err(ConfigError::LimitExceeded { what: "generation budget", .. })
        ));
    }

    #[test]
    fn test_hyperparameters() {
        let cases: [(fn(&mut RunConfig), &str); 6] = [
            (|c| c.aco.population_size = 0, "population_size"),
            (|c| c.aco.max_generations = 0, "max_generations"),
            (|c| c.aco.evaporation_rate = 0.0, "evaporation_rate"),
            (|c| c.aco.q0 = 1.5, "q0"),
            (|c| c.aco.tau0 = -0.1, "tau0"),
            (|c| c.aco.beta = f64::INFINITY, "beta"),
        ];
        for (mutate, expected) in cases {
            let mut c = config();
            mutate(&mut c);
            match validate_config(&c) {
                Err(ConfigError::InvalidHyperparameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected {expected} to be rejected, got {:?}", other),
            }
        }
    }
}
