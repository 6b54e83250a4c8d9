use thiserror::Error;

/// Configuration problems detected before a search starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Pipe {pipe} references node {node}, which does not exist")]
    InvalidTopologyReference { pipe: u32, node: u32 },

    #[error("Node id {0} is declared more than once")]
    DuplicateNodeId(u32),

    #[error("Source node {0} is not part of the network")]
    MissingSourceNode(u32),

    #[error("Parameter count {params} does not match pipe count {pipes}")]
    ParameterCountMismatch { params: usize, pipes: usize },

    #[error("Expected {expected} parameter bounds, got {actual}")]
    BoundsCountMismatch { expected: usize, actual: usize },

    #[error("Invalid bounds for parameter {index}: {reason}")]
    InvalidBounds { index: usize, reason: String },

    #[error("Invalid hyperparameter {name}: {value}")]
    InvalidHyperparameter { name: &'static str, value: f64 },

    #[error("{what} = {value} exceeds the limit of {limit}")]
    LimitExceeded {
        what: &'static str,
        value: usize,
        limit: usize,
    },
}

/// Failures while reading a network description from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
