use tracing::trace;

use crate::config::constant::{
    GRAVITY, INITIAL_HEAD_FACTOR, MAX_RELAXATION_SWEEPS, MIN_HEAD_LOSS, MIN_NET_FLOW,
    PRESSURE_TOLERANCE, SOURCE_HEAD,
};
use crate::domain::network::Inflow;
use crate::domain::types::{FlowFormula, Network, PressureComparison};
use crate::error::ConfigError;
use crate::hydraulics::head_loss::head_loss;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Simulated pressure [kPa] per node, in network order.
    pub pressures: Vec<f64>,
    pub sweeps: usize,
    pub converged: bool,
}

/// Nodal relaxation over a fixed, validated network.
///
/// This is a single-pass surrogate: each non-source node's head is set to the
/// flow-weighted mean of its upstream heads, with flows rescaled from the
/// pipes' reference flows. Mass is not conserved across the network.
#[derive(Debug, Clone)]
pub struct HydraulicSimulator {
    network: Network,
    inflows: Vec<Vec<Inflow>>,
    source: usize,
}

impl HydraulicSimulator {
    pub fn new(network: &Network) -> Result<Self, ConfigError> {
        let inflows = network.inflows()?;
        let source = network
            .source_index()
            .ok_or(ConfigError::MissingSourceNode(network.source_node_id))?;

        Ok(Self {
            network: network.clone(),
            inflows,
            source,
        })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn source(&self) -> usize {
        self.source
    }

    /// Relax nodal pressures for the given per-pipe roughness values.
    pub fn simulate(
        &self,
        roughness: &[f64],
        formula: FlowFormula,
    ) -> Result<SimulationResult, ConfigError> {
        if roughness.len() != self.network.pipes.len() {
            return Err(ConfigError::ParameterCountMismatch {
                params: roughness.len(),
                pipes: self.network.pipes.len(),
            });
        }
        Ok(self.relax(roughness, formula))
    }

    /// `roughness` must hold exactly one value per pipe.
    pub(crate) fn relax(&self, roughness: &[f64], formula: FlowFormula) -> SimulationResult {
        let nodes = &self.network.nodes;
        let mut pressures: Vec<f64> = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| {
                let head = if idx == self.source {
                    SOURCE_HEAD
                } else {
                    SOURCE_HEAD * INITIAL_HEAD_FACTOR
                };
                GRAVITY * (head - node.elevation)
            })
            .collect();

        let mut sweeps = 0;
        let mut converged = false;

        while sweeps < MAX_RELAXATION_SWEEPS {
            sweeps += 1;
            let mut max_change: f64 = 0.0;

            for (idx, node) in nodes.iter().enumerate() {
                if idx == self.source {
                    continue;
                }

                let mut sum_flow = 0.0;
                let mut sum_flow_head = 0.0;

                for inflow in &self.inflows[idx] {
                    let pipe = &self.network.pipes[inflow.pipe];
                    let upstream = &nodes[inflow.upstream];

                    let upstream_head = pressures[inflow.upstream] / GRAVITY + upstream.elevation;
                    let downstream_head = pressures[idx] / GRAVITY + node.elevation;
                    let delta_head = upstream_head - downstream_head;
                    let flow_sign = if delta_head >= 0.0 { 1.0 } else { -1.0 };

                    let loss = head_loss(
                        pipe.flow,
                        pipe.diameter,
                        pipe.length,
                        roughness[inflow.pipe],
                        formula,
                    );
                    let flow_estimate = pipe.flow * (delta_head.abs() / loss.max(MIN_HEAD_LOSS)).sqrt();

                    sum_flow += flow_estimate * flow_sign;
                    sum_flow_head += flow_estimate * flow_sign * upstream_head;
                }

                sum_flow -= node.demand;

                if sum_flow.abs() > MIN_NET_FLOW {
                    let new_head = sum_flow_head / sum_flow;
                    let new_pressure = GRAVITY * (new_head - node.elevation);
                    max_change = max_change.max((new_pressure - pressures[idx]).abs());
                    pressures[idx] = new_pressure;
                }
            }

            trace!("Sweep {}: max pressure change {:.6}", sweeps, max_change);

            if max_change < PRESSURE_TOLERANCE {
                converged = true;
                break;
            }
        }

        SimulationResult {
            pressures,
            sweeps,
            converged,
        }
    }

    /// Pair every node's simulated pressure with its observation.
    pub fn compare(&self, result: &SimulationResult) -> Vec<PressureComparison> {
        self.network
            .nodes
            .iter()
            .zip(&result.pressures)
            .map(|(node, &simulated)| PressureComparison {
                node_id: node.id,
                simulated,
                observed: node.observed_pressure,
            })
            .collect()
    }
}

/// One-shot simulation for callers that do not keep a simulator around.
pub fn simulate(
    network: &Network,
    roughness: &[f64],
    formula: FlowFormula,
) -> Result<SimulationResult, ConfigError> {
    HydraulicSimulator::new(network)?.simulate(roughness, formula)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Node, Pipe};
    use crate::fixtures::example_network::example_network;

    #[test]
    fn test_source_pressure_is_fixed() {
        let network = example_network();
        let result = simulate(&network, &[130.0; 5], FlowFormula::HazenWilliams).unwrap();
        assert_eq!(result.pressures[0], GRAVITY * (SOURCE_HEAD - 50.0));
    }

    #[test]
    fn test_example_network_produces_finite_pressures() {
        let network = example_network();
        for (formula, roughness) in [
            (FlowFormula::HazenWilliams, 130.0),
            (FlowFormula::DarcyWeisbach, 0.005),
            (FlowFormula::Manning, 0.02),
        ] {
            let result = simulate(&network, &[roughness; 5], formula).unwrap();
            assert_eq!(result.pressures.len(), 4);
            assert!(result.sweeps >= 1 && result.sweeps <= MAX_RELAXATION_SWEEPS);
            for p in &result.pressures {
                assert!(p.is_finite(), "{formula}: {p}");
            }
        }
    }

    #[test]
    fn test_simulation_is_repeatable() {
        let simulator = HydraulicSimulator::new(&example_network()).unwrap();
        let roughness = [121.0, 135.0, 128.0, 140.0, 122.0];
        let a = simulator.simulate(&roughness, FlowFormula::HazenWilliams).unwrap();
        let b = simulator.simulate(&roughness, FlowFormula::HazenWilliams).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_node_without_inflow_keeps_initial_pressure() {
        // Node 2 has neither inflow nor demand, so its net flow stays at zero.
        let network = Network {
            nodes: vec![
                Node { id: 1, elevation: 10.0, demand: 0.0, observed_pressure: 0.0 },
                Node { id: 2, elevation: 20.0, demand: 0.0, observed_pressure: 0.0 },
            ],
            pipes: vec![Pipe { id: 1, from_node: 2, to_node: 1, length: 10.0, diameter: 0.1, flow: 0.01 }],
            source_node_id: 1,
        };
        let result = simulate(&network, &[130.0], FlowFormula::HazenWilliams).unwrap();
        assert_eq!(result.pressures[1], GRAVITY * (SOURCE_HEAD * INITIAL_HEAD_FACTOR - 20.0));
        assert_eq!(result.sweeps, 1);
        assert!(result.converged);
    }

    #[test]
    fn test_single_feed_without_demand_takes_upstream_head() {
        // With one inflow and no demand the weighted mean is the upstream head.
        let network = Network {
            nodes: vec![
                Node { id: 1, elevation: 10.0, demand: 0.0, observed_pressure: 0.0 },
                Node { id: 2, elevation: 4.0, demand: 0.0, observed_pressure: 0.0 },
            ],
            pipes: vec![Pipe { id: 1, from_node: 1, to_node: 2, length: 50.0, diameter: 0.2, flow: 0.05 }],
            source_node_id: 1,
        };
        let result = simulate(&network, &[130.0], FlowFormula::HazenWilliams).unwrap();
        let expected = GRAVITY * (SOURCE_HEAD - 4.0);
        assert!((result.pressures[1] - expected).abs() < 1e-9);
        assert!(result.converged);
    }

    #[test]
    fn test_invalid_topology_is_rejected() {
        let mut network = example_network();
        network.pipes[0].to_node = 42;
        assert_eq!(
            simulate(&network, &[130.0; 5], FlowFormula::HazenWilliams),
            Err(ConfigError::InvalidTopologyReference { pipe: 1, node: 42 })
        );
    }

    #[test]
    fn test_short_roughness_is_rejected() {
        let network = example_network();
        assert_eq!(
            simulate(&network, &[130.0], FlowFormula::HazenWilliams),
            Err(ConfigError::ParameterCountMismatch { params: 1, pipes: 5 })
        );

        let simulator = HydraulicSimulator::new(&network).unwrap();
        assert_eq!(
            simulator.simulate(&[0.02; 6], FlowFormula::Manning),
            Err(ConfigError::ParameterCountMismatch { params: 6, pipes: 5 })
        );
    }

    #[test]
    fn test_source_index_follows_source_id() {
        let mut network = example_network();
        assert_eq!(HydraulicSimulator::new(&network).unwrap().source(), 0);

        network.source_node_id = 3;
        assert_eq!(HydraulicSimulator::new(&network).unwrap().source(), 2);
    }

    #[test]
    fn test_compare_pairs_nodes_in_order() {
        let simulator = HydraulicSimulator::new(&example_network()).unwrap();
        let result = simulator.simulate(&[130.0; 5], FlowFormula::HazenWilliams).unwrap();
        let table = simulator.compare(&result);
        assert_eq!(table.len(), 4);
        assert_eq!(table[2].node_id, 3);
        assert_eq!(table[2].observed, 320.0);
        assert_eq!(table[2].simulated, result.pressures[2]);
    }
}
