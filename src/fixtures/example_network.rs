use crate::config::constant::{
    ALPHA, BETA, DEFAULT_SOURCE_NODE_ID, EVAPORATION_RATE, GENERATIONS, POPULATION_SIZE, Q0, TAU0,
};
use crate::domain::types::{AcoParams, FlowFormula, Network, Node, ParamBounds, Pipe, RunConfig};

fn node(id: u32, elevation: f64, demand: f64, observed_pressure: f64) -> Node {
    Node {
        id,
        elevation,
        demand,
        observed_pressure,
    }
}

fn pipe(id: u32, from_node: u32, to_node: u32, length: f64, diameter: f64, flow: f64) -> Pipe {
    Pipe {
        id,
        from_node,
        to_node,
        length,
        diameter,
        flow,
    }
}

/// Small looped test network: a source at node 1 feeding three demand nodes.
///
/// Node 1 sits at 50 m with the source head of 100 m, so its observed
/// pressure equals the imposed 9.81 * 50 kPa.
pub fn example_network() -> Network {
    Network {
        nodes: vec![
            node(1, 50.0, 0.0, 490.5),
            node(2, 45.0, 0.15, 350.0),
            node(3, 40.0, 0.20, 320.0),
            node(4, 42.0, 0.10, 340.0),
        ],
        pipes: vec![
            pipe(1, 1, 2, 100.0, 0.25, 0.30),
            pipe(2, 2, 3, 150.0, 0.20, 0.20),
            pipe(3, 2, 4, 120.0, 0.18, 0.10),
            pipe(4, 3, 4, 80.0, 0.15, 0.05),
            pipe(5, 1, 3, 200.0, 0.30, 0.10),
        ],
        source_node_id: DEFAULT_SOURCE_NODE_ID,
    }
}

/// Plausible roughness range for each formula's coefficient.
pub fn default_bounds(formula: FlowFormula) -> ParamBounds {
    match formula {
        // C factor, dimensionless
        FlowFormula::HazenWilliams => ParamBounds {
            min: 120.0,
            max: 140.0,
            discretization: 1.0,
        },
        // absolute roughness [m]
        FlowFormula::DarcyWeisbach => ParamBounds {
            min: 0.0001,
            max: 0.01,
            discretization: 0.0001,
        },
        // n [s/m^(1/3)]
        FlowFormula::Manning => ParamBounds {
            min: 0.01,
            max: 0.03,
            discretization: 0.001,
        },
    }
}

pub fn default_aco_params(formula: FlowFormula, num_params: usize) -> AcoParams {
    AcoParams {
        population_size: POPULATION_SIZE,
        num_params,
        max_generations: GENERATIONS,
        evaporation_rate: EVAPORATION_RATE,
        alpha: ALPHA,
        beta: BETA,
        q0: Q0,
        tau0: TAU0,
        bounds: vec![default_bounds(formula); num_params],
    }
}

/// Default run over `network`: one roughness parameter per pipe.
pub fn run_config_for(network: Network, formula: FlowFormula) -> RunConfig {
    let aco = default_aco_params(formula, network.pipes.len());
    RunConfig {
        network,
        aco,
        formula,
    }
}

pub fn example_run_config(formula: FlowFormula) -> RunConfig {
    run_config_for(example_network(), formula)
}
