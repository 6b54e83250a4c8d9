pub mod constant {
    /// Gravitational acceleration [m/s²]; pressure [kPa] = g · pressure head [m].
    pub const GRAVITY: f64 = 9.81;
    /// Kinematic viscosity of water [m²/s], used for the Reynolds number.
    pub const KINEMATIC_VISCOSITY: f64 = 1e-6;

    // -- Nodal relaxation --

    /// Total head assumed at the source node [m].
    pub const SOURCE_HEAD: f64 = 100.0;
    /// Non-source nodes start at this fraction of the source head.
    pub const INITIAL_HEAD_FACTOR: f64 = 0.9;
    /// A sweep whose largest pressure change is below this ends the relaxation [kPa].
    pub const PRESSURE_TOLERANCE: f64 = 0.01;
    pub const MAX_RELAXATION_SWEEPS: usize = 50;
    /// Floor applied to a pipe's head loss before it divides the head difference.
    pub const MIN_HEAD_LOSS: f64 = 1e-6;
    /// Net nodal inflow at or below this leaves the node untouched for the sweep.
    pub const MIN_NET_FLOW: f64 = 1e-6;

    // -- Ant colony --

    /// Elitist deposit is this many times the per-ant reinforcement.
    pub const ELITIST_FACTOR: f64 = 2.0;
    /// Fitness floor used when converting a score into a deposit.
    pub const MIN_DEPOSIT_FITNESS: f64 = 1e-9;
    /// Desirability totals below this fall back to a uniform distribution.
    pub const PROBABILITY_EPSILON: f64 = 1e-300;
    /// Relative slack added before flooring range / discretization.
    pub const STEP_ROUNDING_SLACK: f64 = 1e-9;

    // -- Engineering limits --

    /// Maximum number of discrete slots per parameter.
    pub const MAX_STEPS: usize = 100;
    pub const MAX_POPULATION: usize = 50;
    pub const MAX_PARAMS: usize = 20;
    pub const MAX_NODES: usize = 100;
    pub const MAX_PIPES: usize = 100;
    pub const MAX_GENERATIONS: usize = 1000;

    // -- Run defaults --

    pub const DEFAULT_SOURCE_NODE_ID: u32 = 1;
    pub const POPULATION_SIZE: usize = 30;
    pub const GENERATIONS: usize = 200;
    pub const EVAPORATION_RATE: f64 = 0.2;
    pub const ALPHA: f64 = 1.5;
    pub const BETA: f64 = 2.0;
    pub const Q0: f64 = 0.9;
    pub const TAU0: f64 = 0.5;

    // -- Driver --

    /// Log the best fitness every this many generations.
    pub const PROGRESS_INTERVAL: usize = 100;
    pub(crate) const HISTORY_CSV_PREFIX: &str = "best_so_far";
}
