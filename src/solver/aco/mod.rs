pub mod construction;
pub mod monitor;
pub mod pheromone;
pub mod search;
pub mod space;
pub mod update;

pub use monitor::*;
pub use pheromone::PheromoneModel;
pub use search::*;
pub use space::ParameterSpace;
