use std::error::Error;
use std::path::Path;

use colored::*;
use csv::Writer;
use itertools::Itertools;
use tracing::{info, warn};

use crate::domain::types::{FlowFormula, Network, PressureComparison};
use crate::solver::aco::monitor::GenerationSnapshot;
use crate::solver::aco::search::{EstimationResult, StopReason};

/// Relative deviation under which a simulated pressure is shown as a match.
const MATCH_TOLERANCE: f64 = 0.1;

pub fn print_network_summary(network: &Network) {
    info!(
        "Network: {} nodes, {} pipes, source node {}",
        network.nodes.len(),
        network.pipes.len(),
        network.source_node_id
    );
    for node in &network.nodes {
        info!(
            "Node {:3} | elevation {:7.2} m | demand {:6.3} m3/s | observed {:8.2} kPa",
            node.id, node.elevation, node.demand, node.observed_pressure
        );
    }
    for pipe in &network.pipes {
        info!(
            "Pipe {:3} | {:3} -> {:3} | L {:7.1} m | D {:5.3} m | Q {:6.3} m3/s",
            pipe.id, pipe.from_node, pipe.to_node, pipe.length, pipe.diameter, pipe.flow
        );
    }
}

/// True when the simulated pressure lies within `tolerance` of the observation.
/// Nodes without an observation never match.
pub fn is_close_match(comparison: &PressureComparison, tolerance: f64) -> bool {
    comparison.observed > 0.0
        && ((comparison.simulated - comparison.observed) / comparison.observed).abs() <= tolerance
}

pub fn print_results(formula: FlowFormula, result: &EstimationResult) {
    info!("=== {} results ===", formula);
    match &result.stop_reason {
        StopReason::BudgetExhausted => {
            info!("Ran the full budget of {} generations", result.generations_run)
        }
        StopReason::Terminated(reason) => warn!(
            "Stopped after {} generations: {}",
            result.generations_run, reason
        ),
    }
    info!("Best fitness: {}", result.best_fitness);
    info!(
        "Best roughness per pipe: [{}]",
        result.best_params.iter().map(|p| format!("{p:.4}")).join(", ")
    );

    println!("{:>6} {:>12} {:>12}", "Node", "Simulated", "Observed");
    for comparison in &result.pressures {
        let row = format!(
            "{:>6} {:>12.2} {:>12.2}",
            comparison.node_id, comparison.simulated, comparison.observed
        );
        if is_close_match(comparison, MATCH_TOLERANCE) {
            println!("{}", row.green());
        } else {
            println!("{}", row.red());
        }
    }
}

/// Write the per-generation best-so-far history as CSV.
pub fn save_to_csv<P: AsRef<Path>>(
    history: &[GenerationSnapshot],
    filename: P,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filename)?;

    wtr.write_record(["generation", "best_fitness", "improved"])?;

    for snapshot in history {
        let fitness = snapshot
            .best_fitness
            .value()
            .map_or_else(String::new, |v| v.to_string());
        wtr.write_record([
            snapshot.generation.to_string(),
            fitness,
            snapshot.improved.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
