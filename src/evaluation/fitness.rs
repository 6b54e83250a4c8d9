use crate::domain::types::{Fitness, Network};

/// RMS percentage error between simulated and observed pressures.
///
/// Only nodes with a strictly positive observation count, and the source
/// node is skipped since its pressure is imposed rather than simulated.
/// A diverged simulation (non-finite error) cannot be scored either.
pub fn evaluate_fitness(network: &Network, pressures: &[f64]) -> Fitness {
    let mut total_error = 0.0;
    let mut valid_nodes = 0usize;

    for (node, &simulated) in network.nodes.iter().zip(pressures) {
        if node.observed_pressure > 0.0 && node.id != network.source_node_id {
            let error = (simulated - node.observed_pressure) / node.observed_pressure;
            total_error += error * error;
            valid_nodes += 1;
        }
    }

    if valid_nodes == 0 {
        return Fitness::Unevaluable;
    }

    let score = (total_error / valid_nodes as f64).sqrt() * 100.0;
    if score.is_finite() {
        Fitness::Scored(score)
    } else {
        Fitness::Unevaluable
    }
}
