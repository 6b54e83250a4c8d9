pub mod head_loss;
pub mod simulator;

pub use head_loss::head_loss;
pub use simulator::{simulate, HydraulicSimulator, SimulationResult};
