pub mod network;
pub mod types;

pub use network::*;
pub use types::*;
