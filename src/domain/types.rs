use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::constant::DEFAULT_SOURCE_NODE_ID;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: u32,
    pub elevation: f64,
    #[serde(default)]
    pub demand: f64,
    /// Field pressure [kPa]; zero or negative means "not observed".
    #[serde(default)]
    pub observed_pressure: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    pub from_node: u32,
    pub to_node: u32,
    pub length: f64,
    pub diameter: f64,
    /// Reference flow [m³/s] used to rescale the relaxation estimate.
    pub flow: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub nodes: Vec<Node>,
    pub pipes: Vec<Pipe>,
    #[serde(default = "default_source_node_id")]
    pub source_node_id: u32,
}

fn default_source_node_id() -> u32 {
    DEFAULT_SOURCE_NODE_ID
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowFormula {
    HazenWilliams,
    DarcyWeisbach,
    Manning,
}

impl FlowFormula {
    pub const ALL: [FlowFormula; 3] = [
        FlowFormula::HazenWilliams,
        FlowFormula::DarcyWeisbach,
        FlowFormula::Manning,
    ];

    /// Short lowercase name, safe for file names.
    pub fn slug(self) -> &'static str {
        match self {
            FlowFormula::HazenWilliams => "hazen_williams",
            FlowFormula::DarcyWeisbach => "darcy_weisbach",
            FlowFormula::Manning => "manning",
        }
    }
}

impl fmt::Display for FlowFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowFormula::HazenWilliams => "Hazen-Williams",
            FlowFormula::DarcyWeisbach => "Darcy-Weisbach",
            FlowFormula::Manning => "Manning",
        };
        f.write_str(name)
    }
}

/// One searchable dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamBounds {
    pub min: f64,
    pub max: f64,
    pub discretization: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcoParams {
    pub population_size: usize,
    pub num_params: usize,
    pub max_generations: usize,
    pub evaporation_rate: f64,
    pub alpha: f64,
    pub beta: f64,
    pub q0: f64,
    pub tau0: f64,
    pub bounds: Vec<ParamBounds>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub network: Network,
    pub aco: AcoParams,
    pub formula: FlowFormula,
}

/// Score of a candidate. Lower is better; `Unevaluable` loses to every score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fitness {
    Scored(f64),
    /// No node carries a usable observation, so nothing can be compared.
    Unevaluable,
}

impl Fitness {
    pub fn value(self) -> Option<f64> {
        match self {
            Fitness::Scored(v) => Some(v),
            Fitness::Unevaluable => None,
        }
    }

    pub fn is_better_than(self, other: Fitness) -> bool {
        match (self, other) {
            (Fitness::Scored(a), Fitness::Scored(b)) => a < b,
            (Fitness::Scored(_), Fitness::Unevaluable) => true,
            (Fitness::Unevaluable, _) => false,
        }
    }
}

impl fmt::Display for Fitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fitness::Scored(v) => write!(f, "{v:.6}"),
            Fitness::Unevaluable => f.write_str("unevaluable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub params: Vec<f64>,
    pub fitness: Fitness,
    /// Joint probability of the steps picked during the last construction.
    pub probability: f64,
}

impl Candidate {
    pub fn new(params: Vec<f64>) -> Self {
        Self {
            params,
            fitness: Fitness::Unevaluable,
            probability: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureComparison {
    pub node_id: u32,
    pub simulated: f64,
    pub observed: f64,
}
