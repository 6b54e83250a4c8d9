use std::collections::HashMap;

use crate::domain::types::Network;
use crate::error::ConfigError;

/// An incoming pipe seen from its downstream node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inflow {
    pub pipe: usize,
    pub upstream: usize,
}

impl Network {
    pub fn node_index(&self, id: u32) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn source_index(&self) -> Option<usize> {
        self.node_index(self.source_node_id)
    }

    /// Check that node ids are unique, the source exists and every pipe
    /// endpoint names a declared node.
    pub fn validate_topology(&self) -> Result<(), ConfigError> {
        let mut seen: HashMap<u32, usize> = HashMap::with_capacity(self.nodes.len());
        for (idx, node) in self.nodes.iter().enumerate() {
            if seen.insert(node.id, idx).is_some() {
                return Err(ConfigError::DuplicateNodeId(node.id));
            }
        }

        if !seen.contains_key(&self.source_node_id) {
            return Err(ConfigError::MissingSourceNode(self.source_node_id));
        }

        for pipe in &self.pipes {
            for endpoint in [pipe.from_node, pipe.to_node] {
                if !seen.contains_key(&endpoint) {
                    return Err(ConfigError::InvalidTopologyReference {
                        pipe: pipe.id,
                        node: endpoint,
                    });
                }
            }
        }

        Ok(())
    }

    /// For every node (by position), the pipes ending there in pipe order,
    /// with the position of their upstream node.
    pub fn inflows(&self) -> Result<Vec<Vec<Inflow>>, ConfigError> {
        self.validate_topology()?;

        let index: HashMap<u32, usize> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(idx, n)| (n.id, idx))
            .collect();

        let mut inflows = vec![Vec::new(); self.nodes.len()];
        for (pipe_idx, pipe) in self.pipes.iter().enumerate() {
            // Both lookups are covered by validate_topology.
            if let (Some(&to), Some(&from)) = (index.get(&pipe.to_node), index.get(&pipe.from_node)) {
                inflows[to].push(Inflow {
                    pipe: pipe_idx,
                    upstream: from,
                });
            }
        }
        Ok(inflows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Node, Pipe};
    use crate::fixtures::example_network::example_network;

    fn node(id: u32) -> Node {
        Node {
            id,
            elevation: 0.0,
            demand: 0.0,
            observed_pressure: 0.0,
        }
    }

    fn pipe(id: u32, from_node: u32, to_node: u32) -> Pipe {
        Pipe {
            id,
            from_node,
            to_node,
            length: 1.0,
            diameter: 0.1,
            flow: 0.1,
        }
    }

    #[test]
    fn test_example_network_is_valid() {
        assert_eq!(example_network().validate_topology(), Ok(()));
    }

    #[test]
    fn test_dangling_pipe_is_reported() {
        let network = Network {
            nodes: vec![node(1), node(2)],
            pipes: vec![pipe(7, 1, 2), pipe(8, 2, 9)],
            source_node_id: 1,
        };
        assert_eq!(
            network.validate_topology(),
            Err(ConfigError::InvalidTopologyReference { pipe: 8, node: 9 })
        );
    }

    #[test]
    fn test_duplicate_and_missing_source() {
        let duplicated = Network {
            nodes: vec![node(1), node(1)],
            pipes: vec![],
            source_node_id: 1,
        };
        assert_eq!(
            duplicated.validate_topology(),
            Err(ConfigError::DuplicateNodeId(1))
        );

        let sourceless = Network {
            nodes: vec![node(2)],
            pipes: vec![],
            source_node_id: 1,
        };
        assert_eq!(
            sourceless.validate_topology(),
            Err(ConfigError::MissingSourceNode(1))
        );
    }

    #[test]
    fn test_inflows_follow_pipe_order() {
        let inflows = example_network().inflows().unwrap();
        // Node 3 (position 2) is fed by pipe 2 (from node 2) then pipe 5 (from node 1).
        assert_eq!(
            inflows[2],
            vec![
                Inflow { pipe: 1, upstream: 1 },
                Inflow { pipe: 4, upstream: 0 },
            ]
        );
        assert!(inflows[0].is_empty());
    }
}
