pub mod example_network;
pub mod loader;
