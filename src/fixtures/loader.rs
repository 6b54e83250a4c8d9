use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::domain::types::{Network, RunConfig};
use crate::error::LoadError;

use super::example_network::example_network;

/// Read a `Network` from a JSON file.
pub fn load_network<P: AsRef<Path>>(path: P) -> Result<Network, LoadError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Read a complete `RunConfig` (network, colony parameters, formula) from JSON.
pub fn load_run_config<P: AsRef<Path>>(path: P) -> Result<RunConfig, LoadError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Loads the network at `path`, or the built-in example when no path is
/// given or the file cannot be used.
pub fn load_network_or_example(path: Option<&str>) -> Network {
    let Some(path) = path else {
        info!("No network file given, using the built-in example network");
        return example_network();
    };

    match load_network(path) {
        Ok(network) => {
            info!(
                "Loaded network from {}: {} nodes, {} pipes",
                path,
                network.nodes.len(),
                network.pipes.len()
            );
            network
        }
        Err(err) => {
            warn!(
                "Failed to read network file at {}: {}. Falling back to the example network.",
                path, err
            );
            example_network()
        }
    }
}
